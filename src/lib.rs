//! Phonehenge is the show-timeline engine for a tap-driven ring performance.
//!
//! A ring of phone sprites walks a fixed 31-state activation sequence while a wall-clock
//! scheduler advances the state index. Each participant runs a [`ShowSession`]:
//!
//! - Load and validate a [`ShowConfig`]
//! - Create a [`ShowSession`] for the participant's [`Role`]
//! - Call [`ShowSession::tick`] once per display refresh and [`ShowSession::pointer_up`] on taps
//! - Read the composited [`Surface`] from [`ShowSession::frame`]
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod foundation;

pub(crate) mod animation;
pub(crate) mod effects;
pub(crate) mod geometry;
pub(crate) mod input;
pub(crate) mod render;
pub(crate) mod sequence;
pub(crate) mod show;
pub(crate) mod timeline;
pub(crate) mod view;

pub use crate::foundation::core::{Affine, Canvas, Point, Rect, Rgba8Premul, Vec2};
pub use crate::foundation::error::{HengeError, HengeResult};

pub use crate::animation::ease::Ease;
pub use crate::effects::crossfade::CrossfadeController;
pub use crate::geometry::ring::{
    RingLayout, RingSpec, SlotGeometry, compute_ring, feet_touch_radius,
};
pub use crate::input::hit::{Hit, HitContext, HitRegions, route};
pub use crate::input::pointer::PointerMapper;
pub use crate::render::layers::{LayerKind, LayeredCompositor};
pub use crate::render::painters::{
    BackdropPainter, GradientBackdrop, LabelPlates, SpriteDraw, SpriteProvider, TapListener,
    TextProvider, VectorSprites, paint_debug_overlay,
};
pub use crate::render::surface::Surface;
pub use crate::sequence::family::{ActivationMapper, Family, FamilyBitLayout, family_for_slot};
pub use crate::sequence::table::{
    FAMILY_COUNT, SEQUENCE_LEN, SequenceEntry, entries, entry_at, entry_for_state, next_state,
    prev_state,
};
pub use crate::show::config::{FadeConfig, HotspotConfig, RingConfig, ShowConfig};
pub use crate::show::session::{ShowSession, TickReport};
pub use crate::show::sync::ClockMessage;
pub use crate::timeline::clock::{Advance, FINAL_INDEX, ShowClock};
pub use crate::timeline::readout::{ClockReadout, display_ms};
pub use crate::timeline::tempo::{ShowMode, TempoConfig};
pub use crate::view::machine::{TickOutcome, View, ViewStateMachine, ViewTransition};
pub use crate::view::status::{Role, ShowStatus, StatusSnapshot};
pub use crate::view::text::{LabelAnchor, TextLabel, TextLayout};
