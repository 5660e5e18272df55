// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
pub mod id;
pub mod sat;
pub mod scalar;
pub mod vector;
