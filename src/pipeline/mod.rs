//! Pipeline stages for PDF-to-briefing conversion.
//!
//! Each submodule implements exactly one transformation step.
//! Keeping stages separate makes each independently testable and lets us
//! swap implementations (e.g. switch the TTS backend) without touching
//! other stages.
//!
//! ## Data Flow
//!
//! ```text
//! input ──▶ extract ──▶ join ──▶ segment ──▶ filter ──▶ normalize ──▶ classify
//! (URL/path) (per-page)  (document text)      (sentences)              (insights)
//!                           │
//!                           └──▶ evidence ──▶ llm ──▶ tts
//!                               (bullet pack) (briefing) (audio)
//! ```
//!
//! 1. [`input`]     — canonicalise the user-supplied path or URL to a local file
//! 2. [`extract`]   — per-page raw text; runs in `spawn_blocking` because PDF
//!    parsing is CPU-bound
//! 3. [`join`]      — repair hyphenation and line-wrapped sentences per page
//! 4. [`segment`]   — whitespace normalization and sentence boundaries
//! 5. [`filter`]    — reject boilerplate and collapsed-table garbage
//! 6. [`normalize`] — bracket cleanup, rewrites, capitalization
//! 7. [`classify`]  — ordered-rule categorisation with global dedup and caps
//! 8. [`evidence`]  — bounded high-signal excerpt for the summarizer
//! 9. [`llm`]       — the only stage with network I/O: retry/backoff chat call
//! 10. [`tts`]      — subprocess speech rendering with retry and timeout
//!
//! Stages 3–8 are synchronous pure functions over immutable inputs; every
//! document run owns its own state, so nothing here is shared or locked.

pub mod classify;
pub mod evidence;
pub mod extract;
pub mod filter;
pub mod input;
pub mod join;
pub mod llm;
pub mod normalize;
pub mod segment;
pub mod tts;
