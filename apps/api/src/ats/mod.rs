// ATS resume scanning: keyword extraction, resume signals, scoring,
// suggestions, scan history and the HTTP handlers on top.
// The scoring path is pure; only handlers and history touch I/O.

pub mod handlers;
pub mod history;
pub mod keywords;
pub mod scorer;
pub mod signals;
pub mod suggestions;
