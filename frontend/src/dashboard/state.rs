/// Query and threshold currently driving the table. `revision` grows with
/// every submission, so sending the same values again still refreshes.
#[derive(Clone, Debug, PartialEq)]
pub struct Parameters {
    pub query: String,
    pub threshold: u64,
    pub revision: u64,
}

impl Parameters {
    pub fn new(query: String, threshold: u64) -> Self {
        Self {
            query,
            threshold,
            revision: 0,
        }
    }

    pub fn with_query(&self, query: String) -> Self {
        Self {
            query,
            threshold: self.threshold,
            revision: self.revision + 1,
        }
    }

    pub fn with_threshold(&self, threshold: u64) -> Self {
        Self {
            query: self.query.clone(),
            threshold,
            revision: self.revision + 1,
        }
    }

    /// A response may only be shown while no newer request has been started.
    pub fn is_latest(&self, latest_revision: u64) -> bool {
        self.revision == latest_revision
    }
}
