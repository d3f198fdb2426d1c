use crate::value::{Slice, Target};

/// Read-only view of one dataset row split into features and target.
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    features: Slice,
    target: Target,
}

impl Row {
    pub fn new(features: impl Into<Slice>, target: impl Into<Target>) -> Self {
        Row {
            features: features.into(),
            target: target.into(),
        }
    }

    pub fn features(&self) -> &Slice {
        &self.features
    }

    pub fn target(&self) -> &Target {
        &self.target
    }

    pub fn num_features(&self) -> usize {
        self.features.len()
    }

    pub fn num_targets(&self) -> usize {
        self.target.len()
    }

    pub fn into_parts(self) -> (Slice, Target) {
        (self.features, self.target)
    }
}
