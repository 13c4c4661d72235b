//! Floor-plan canvas engine for the wall-painting robot planner.
//!
//! This crate owns everything between raw pointer input and pixels: the
//! world/screen transform, the obstacle authoring state machine, the scene
//! renderer, and time-based playback of a robot trajectory. The host is
//! responsible only for forwarding pointer events, supplying a drawing
//! [`render::Surface`] and a [`schedule::Scheduler`], and exchanging
//! [`doc::RoomModel`]s and waypoint sequences with the planning service.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`engine`] | Top-level engine and testable [`engine::EngineCore`] |
//! | [`doc`] | Obstacles, waypoints, trajectories and derived stats |
//! | [`camera`] | World (meters) to screen (pixels) scaling |
//! | [`input`] | Pointer event types and the drawing state machine |
//! | [`hit`] | Hit-testing against the obstacle list |
//! | [`render`] | Scene rendering over a [`render::Surface`] |
//! | [`svg`] | SVG document surface for headless snapshots |
//! | [`playback`] | Frame-rate independent waypoint playback controller |
//! | [`schedule`] | Tick scheduler abstraction and implementations |
//! | [`player`] | Binds a scheduler to the engine and a surface |
//! | [`consts`] | Shared numeric and style constants |

pub mod camera;
pub mod consts;
pub mod doc;
pub mod engine;
pub mod hit;
pub mod input;
pub mod playback;
pub mod player;
pub mod render;
pub mod schedule;
pub mod svg;
