// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! I/O: persistence backends, debounced sync, export, media loading.

pub mod media;
pub mod repository;
pub mod serialization;
pub mod sync;
