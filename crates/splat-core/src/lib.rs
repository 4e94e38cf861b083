//! Splat Core - Hexagonal Architecture Implementation
//!
//! This crate provides the domain and application layers for the splat
//! template synchronizer, following hexagonal (ports and adapters) architecture.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │            splat-cli (CLI)              │
//! │   (Config, Prompt, Reporter adapters)   │
//! └──────────────────┬──────────────────────┘
//!                    │ calls
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Application Services            │
//! │ (SplatService, FileSynchronizer,        │
//! │  ManifestMerger)                        │
//! └──────────────────┬──────────────────────┘
//!                    │ uses
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │      Application Ports (Traits)         │
//! │   (Filesystem, Prompt, Reporter)        │
//! └──────────────────┬──────────────────────┘
//!                    │ implemented by
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │     splat-adapters (Infrastructure)     │
//! │  (LocalFilesystem, MemoryFilesystem)    │
//! └─────────────────────────────────────────┘
//!                    │
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Domain Layer (Pure Logic)       │
//! │ (ContentHash, SyncDecision, Manifest)   │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,no_run
//! use splat_core::application::{SplatConfig, SplatService};
//!
//! # async fn demo(filesystem: Box<dyn splat_core::application::ports::Filesystem>,
//! #               prompt: Box<dyn splat_core::application::ports::Prompt>,
//! #               reporter: Box<dyn splat_core::application::ports::Reporter>)
//! #               -> splat_core::error::SplatResult<()> {
//! let config = SplatConfig::new("default", "/templates/default", "./my-project");
//! let service = SplatService::new(filesystem, prompt, reporter);
//! let summary = service.run(&config).await?;
//! println!("changed: {}", summary.changed());
//! # Ok(())
//! # }
//! ```

pub mod domain;

pub mod application;

pub mod error;
