/*
 * mod.rs
 * Copyright (c) 2025 blockdocs contributors
 */

pub mod docx;
pub mod pdf;
