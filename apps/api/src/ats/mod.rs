// Keyword ATS scoring
// Implements: tokenization, stemming, tiered keyword scoring, HTTP handlers.
// Pure computation — no I/O below the handlers.

pub mod handlers;
pub mod keyword_scorer;
pub mod stemmer;
pub mod tokenizer;
