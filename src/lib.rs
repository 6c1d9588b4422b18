// -- Lint policy ---------------------------------------------------------
// This is the single source of truth for crate-wide lints.

// Broad lint groups
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![deny(clippy::nursery)]
// Documentation
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]
#![deny(rustdoc::bare_urls)]
// No panicking in library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![deny(clippy::todo)]
#![deny(clippy::unimplemented)]
// No debug/print artifacts
#![deny(clippy::dbg_macro)]
#![deny(clippy::print_stdout)]
#![deny(clippy::print_stderr)]
// Import hygiene
#![deny(clippy::wildcard_imports)]
// Function signature hygiene
#![deny(clippy::too_many_arguments)]
#![deny(clippy::fn_params_excessive_bools)]
// Clone / pass-by-value hygiene
#![deny(clippy::needless_pass_by_value)]
#![deny(clippy::implicit_clone)]
// String hygiene
#![deny(clippy::inefficient_to_string)]
#![deny(clippy::redundant_closure_for_method_calls)]
#![deny(clippy::manual_string_new)]
#![deny(clippy::str_to_string)]
// Cargo lints (warn, not deny since cargo lints can be noisy)
#![warn(clippy::cargo)]
// Unused / redundant code
#![deny(unused_results)]
#![deny(unused_qualifications)]
// Cast hygiene
#![deny(trivial_casts)]
#![deny(trivial_numeric_casts)]

//! Section-snapping full-page scroll controller.
//!
//! Treats a page as a finite sequence of full-viewport sections. Wheel,
//! keyboard, touch and anchor-link input become "advance", "retreat" or
//! "go to section i"; transitions are animated with an ease-in-out cubic
//! curve; input arriving during a transition is dropped; and a position
//! indicator follows the scroll offset.
//!
//! # Key entry points
//!
//! - [`PageController`] - the object a host drives
//! - [`navigator::SectionNavigator`] - the snapping state machine
//! - [`animation::ScrollAnimator`] - generation-checked smooth scrolling
//! - [`options::Options`] - runtime configuration (timing, thresholds,
//!   keybindings, indicator, header effects)
//! - [`host`] - the traits a page implements (sections, viewport, class
//!   setters)
//!
//! # Architecture
//!
//! The core never touches a document. Time arrives as [`web_time::Instant`]
//! arguments, the scroll surface and section geometry through the
//! [`host`] traits. The `web` feature binds the controller to the browser
//! DOM; the `snapscroll` binary replays scripted scenarios against a
//! simulated viewport.

pub mod animation;
pub mod effects;
pub mod error;
pub mod host;
pub mod indicator;
pub mod input;
pub mod navigator;
pub mod options;
pub mod page;
pub mod replay;
pub mod util;
#[cfg(feature = "web")]
pub mod web;

pub use error::SnapError;
pub use page::{EventOutcome, EventResponse, PageController};
