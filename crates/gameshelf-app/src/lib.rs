// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

pub mod address;
pub mod catalog;
pub mod model;
pub mod query;
pub mod state;
pub mod tags;

pub use address::*;
pub use catalog::*;
pub use model::*;
pub use query::*;
pub use state::*;
pub use tags::*;
