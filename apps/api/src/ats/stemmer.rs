use rust_stemmers::{Algorithm, Stemmer};

/// Porter-family (English / Porter2) suffix stripper. Pure: the same token
/// always maps to the same stem.
pub struct KeywordStemmer {
    inner: Stemmer,
}

impl Default for KeywordStemmer {
    fn default() -> Self {
        Self::new()
    }
}

impl KeywordStemmer {
    pub fn new() -> Self {
        Self {
            inner: Stemmer::create(Algorithm::English),
        }
    }

    pub fn stem(&self, token: &str) -> String {
        self.inner.stem(token).into_owned()
    }
}
