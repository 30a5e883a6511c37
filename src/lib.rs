//! Sharecard renders social preview images for conference sessions.
//!
//! Each image is described by a [`LayoutDescriptor`]: a list of images (optionally cropped to a
//! circle) and a list of styled, optionally wrapped text blocks, painted in order over a
//! background template.
//!
//! # Pipeline overview
//!
//! 1. **Resolve**: every speaker avatar URL is mapped to a local file, or to
//!    [`PLACEHOLDER_AVATAR`], through an [`AvatarResolver`].
//! 2. **Describe**: [`build_layout`] joins per-session content with a static [`StyleTable`].
//! 3. **Compose**: [`CompositionEngine::create_image`] composites the descriptor over the
//!    template and writes `<output>/<output_key>.png`.
//!
//! [`generate_images`] runs the three steps for a whole session map, isolating failures per
//! session.
//!
//! The design constraints:
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **Deterministic**: identical inputs produce byte-identical PNGs.
//! - **Explicit configuration**: the engine only touches paths given in [`EngineConfig`] and in
//!   the descriptor; nothing is read from the environment.
//! - **Premultiplied RGBA8** while compositing; written files are straight-alpha RGBA8.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod assets;
mod foundation;
mod layout;
mod render;
mod session;

pub use assets::decode::{
    PreparedImage, decode_image, load_rgba_image, premultiply_rgba8_in_place,
    unpremultiply_rgba8_in_place,
};
pub use assets::text::{FontCache, LoadedFont, TextBrushRgba8, TextLayoutEngine};
pub use foundation::config::EngineConfig;
pub use foundation::core::{ImageMask, Position, Rgb8, Size};
pub use foundation::error::{SharecardError, SharecardResult};
pub use layout::builder::{SessionContent, build_layout, compose_layout};
pub use layout::descriptor::{
    DEFAULT_LINE_ADVANCE, FontSpec, ImageElement, LayoutDescriptor, TextElement,
};
pub use layout::style::{CaptionSource, ImageStyle, StyleTable, TextRole, TextStyle};
pub use layout::wrap::wrap_text;
pub use render::composite::{Placement, over, over_at, over_in_place};
pub use render::engine::{
    CompositionEngine, ElementRef, RenderOutcome, RenderedImage, SkippedElement,
};
pub use render::mask::{apply_circle_mask, inscribed_circle};
pub use session::avatar::{
    AvatarResolver, DirectoryAvatarResolver, MIN_AVATAR_REF_LEN, PLACEHOLDER_AVATAR,
    resolve_avatar, resolve_speakers, slugify,
};
pub use session::batch::{
    RenderThreading, RunSummary, SessionOutcome, SessionStatus, generate_images,
};
pub use session::model::{SessionMap, SessionRecord, SpeakerRecord, load_sessions, parse_sessions};
