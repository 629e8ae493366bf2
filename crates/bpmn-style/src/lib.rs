//! BPMN Style - Shape and icon composition for BPMN diagram elements
//!
//! This library turns the typed parameters of a BPMN element (task type,
//! loop characteristic, participants, gateway type and so on) into the
//! geometry a renderer needs: a closed outline for hit-testing and edge
//! clipping, a composed icon tree, and the insets that keep labels clear of
//! markers, bands and headers.
//!
//! Styles cache their icon trees and rebuild only the parts whose inputs
//! changed. A [`scene::Scene`] hosts styles with their layouts and labels
//! and renders them to SVG, reusing node visuals between renders.
//!
//! # Examples
//!
//! ```
//! use bpmn_style::{
//!     geometry::Bounds,
//!     identifier::Id,
//!     label::LabelParameter,
//!     render::svg::SvgContext,
//!     scene::Scene,
//!     style::{ChoreographyStyle, Participant},
//! };
//!
//! let mut choreography = ChoreographyStyle::new();
//! choreography.top_participants_mut().push(Participant::new(false));
//! choreography.bottom_participants_mut().push(Participant::new(true));
//!
//! let mut scene = Scene::new();
//! let id = Id::new("order");
//! scene.add_node(id, choreography, Bounds::from_xywh(0.0, 0.0, 120.0, 100.0))?;
//! scene.add_band_label(id, LabelParameter::TaskNameBand, "Place order")?;
//!
//! let (document, stats) = scene.render_svg(&mut SvgContext::new());
//! assert_eq!(stats.rebuilt, 1);
//! assert!(document.to_string().contains("Place order"));
//! # Ok::<(), bpmn_style::StyleError>(())
//! ```

pub mod config;
pub mod insets;
pub mod label;
pub mod render;
pub mod scene;
pub mod style;

mod error;

pub use bpmn_style_core::{color, draw, geometry, icon, identifier, path};

pub use error::StyleError;
