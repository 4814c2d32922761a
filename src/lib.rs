// SPDX-License-Identifier: BSD-3-Clause
// Copyright (c) 2026 Aleksandr Ptakhin

//! Creative Sparkles marketing-site server: static SPA host plus the
//! contact / subscribe / testimonial mail API.

pub mod app;
pub mod models;
pub mod routes;
pub mod services;
