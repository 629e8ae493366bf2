//! BPMN Style Core Types
//!
//! This crate provides the building blocks element styles are made of:
//!
//! - **Geometry**: Points, sizes, bounds, insets and oriented label
//!   rectangles ([`geometry`] module)
//! - **Paths**: Outline builders and unit-square path templates ([`path`] module)
//! - **Icons**: Immutable, composable icon trees ([`icon`] module)
//! - **Render**: Retained visual trees and the SVG backend ([`render`] module)
//! - **Draw**: Colors, strokes, paints and layered SVG output ([`draw`] and
//!   [`color`] modules)
//! - **Identifiers**: String-interned element ids ([`identifier::Id`])

pub mod color;
pub mod draw;
pub mod error;
pub mod geometry;
pub mod icon;
pub mod identifier;
pub mod path;
pub mod render;
