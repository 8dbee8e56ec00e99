//! Core query and projection engine for FigDeck
//!
//! Pure, synchronous operations over a Figma document tree already fetched
//! by the client layer: locator parsing, tree traversal, domain queries,
//! bounded summarization, and style extraction. Nothing here performs I/O.

pub mod locator;
pub mod node;
pub mod query;
pub mod style;
pub mod summary;
pub mod walk;

pub use locator::{extract_file_key, extract_node_id, parse_locator, Locator};
pub use node::{Color, Node, Rect};
pub use query::{
    all_components, find_by_id, find_by_name, frame_name_suggestions, top_level_frames,
    ComponentInfo, FrameInfo, NAME_SUGGESTION_LIMIT,
};
pub use style::{color_to_css, extract_styles, LayoutStyle, NodeStyles, OPAQUE_ALPHA};
pub use summary::{summarize_node, NodeSummary, MAX_CHILD_SUMMARIES, TEXT_PREVIEW_CHARS};
pub use walk::{find_node, for_each_node, MAX_TRAVERSAL_DEPTH};
