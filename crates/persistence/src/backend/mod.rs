// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Backend-specific connection setup.
//!
//! Only `SQLite` is supported. Everything here is raw SQL that Diesel has
//! no DSL for; queries and mutations stay in their own modules.

pub mod sqlite;
