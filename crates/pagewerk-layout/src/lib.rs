// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// pagewerk-layout: The layout engine behind every Pagewerk conversion.
//
// Wraps paragraphs into width-bounded lines against real glyph metrics,
// distributes lines and table rows over fixed-size pages, and resolves split
// requests into groups of source page indices. Pure and synchronous: no PDF
// dependencies, no I/O and no logging. Errors are returned, never recovered.

pub mod breaker;
pub mod metrics;
pub mod paginator;
pub mod range;
pub mod table;

pub use breaker::{Line, break_paragraph};
pub use metrics::{BuiltinMetrics, GlyphMetrics, MonospaceMetrics};
pub use paginator::{Page, PlacedUnit, RenderableUnit, paginate, paginate_paragraphs, paginate_units};
pub use range::{RangeGroup, RangeMode, RangeRequest, RangeSpec, RangeValue, resolve};
pub use table::{RowLimit, TableLayout, TableRow};
