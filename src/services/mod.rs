// SPDX-License-Identifier: BSD-3-Clause
// Copyright (c) 2026 Aleksandr Ptakhin

pub mod compose;
pub mod logging;
pub mod mailer;
pub mod rate_limit;
pub mod sanitize;
