// SPDX-License-Identifier: MIT OR Apache-2.0
// Project: rustverihash
// File: lib.rs
// Author: Volker Schwaberow <volker@schwaberow.de>
// Copyright (c) 2022 Volker Schwaberow

pub mod rvh {
	pub mod app;
	pub mod engine;
	pub mod output;
}
