//! # Code Atlas - Source Structure Extraction
//!
//! Parses source files into a flat catalog of structural elements
//! (functions, methods, classes) with derived metadata: reconstructed
//! signatures, parameter lists, return types, visibility, decorators,
//! cyclomatic-style complexity, and a coarse dependency set. The output is
//! a serializable [`types::FileAnalysis`] per file, suitable for
//! downstream storage, search, or documentation generation.
//!
//! ## Overview
//!
//! A single depth-first walk over the syntax tree drives scope tracking
//! and element assembly, so every derivation rule agrees on one notion of
//! the current enclosing class. Parsing is all-or-nothing: a file yields a
//! complete analysis or a typed error, never a partial element list.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────┐
//! │ ProjectAnalyzer  │  directory fan-out (rayon, fresh
//! └────────┬─────────┘  extractor per file)
//!          │
//! ┌────────▼─────────┐     ┌────────────┐
//! │StructureExtractor│────▶│FileAnalysis│
//! └────────┬─────────┘     └────────────┘
//!          │ one DFS walk
//!    ┌─────┴──────┬───────────┬──────────────┬─────────┐
//!    │            │           │              │         │
//! ┌──▼───┐  ┌─────▼────┐  ┌───▼──────┐  ┌────▼───┐ ┌───▼───┐
//! │Scope │  │Signature │  │Complexity│  │Depend. │ │Imports│
//! │stack │  │rebuild   │  │scoring   │  │collect │ │log    │
//! └──────┘  └──────────┘  └──────────┘  └────────┘ └───────┘
//! ```
//!
//! ## Concurrency
//!
//! A single parse is synchronous and non-suspending. Cross-file
//! parallelism is safe when every concurrent parse uses its own extractor;
//! [`analyzer::ProjectAnalyzer`] does exactly that. Walk state (scope
//! stack, import log) is created fresh per call and never stored on the
//! extractor.
//!
//! ## Usage Example
//!
//! ```no_run
//! use code_atlas::extractor::StructureExtractor;
//! use code_atlas::language::Language;
//!
//! fn main() -> anyhow::Result<()> {
//!     let mut extractor = StructureExtractor::new(Language::Python)?;
//!     let analysis = extractor.parse_file("src/app.py")?;
//!
//!     for element in &analysis.elements {
//!         println!("{} {}", element.signature, element.complexity_score);
//!     }
//!     Ok(())
//! }
//! ```

/// Directory-level batch analysis with per-file error aggregation
pub mod analyzer;

/// Configuration management with environment variable overrides
pub mod config;

/// Error types and utilities
pub mod error;

/// Structure extraction: tree building, scope tracking, element assembly
pub mod extractor;

/// Language detection and grammar registry
pub mod language;

/// Boundary data model: code elements and file analyses
pub mod types;

/// Source file discovery for directory walks
pub mod walker;
