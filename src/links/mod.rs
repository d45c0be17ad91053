//! Links module - find anchors in HTML documents and retarget external ones
//!
//! An anchor is external when its resolved URL starts with `http://` or
//! `https://`. The annotate pass assigns such anchors a browsing-context
//! target (default "new") so following the link opens a separate tab;
//! everything else is left untouched.

pub mod annotate;
pub mod api;
pub mod html;
pub mod resolve;
