use rangeland_core::{Conditions, Predictor, Slope};
use serde::{Deserialize, Serialize};
use statrs::statistics::{Data, Median};

use crate::Error;

/// An ensemble that predicts the component-wise median of its members.
///
/// Taking the median rather than the mean keeps a few outlying members from
/// dragging the slope, which matters near regime shifts where members
/// disagree. Serialized as a JSON array of members.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<P>", into = "Vec<P>")]
#[serde(bound(
    serialize = "P: Serialize + Clone",
    deserialize = "P: Deserialize<'de>"
))]
pub struct MedianEnsemble<P> {
    members: Vec<P>,
}

impl<P> MedianEnsemble<P> {
    /// Creates an ensemble from its members.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyEnsemble`] if `members` is empty.
    pub fn new(members: Vec<P>) -> Result<Self, Error> {
        if members.is_empty() {
            return Err(Error::EmptyEnsemble);
        }
        Ok(Self { members })
    }

    #[must_use]
    pub fn members(&self) -> &[P] {
        &self.members
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.members.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

impl<P> TryFrom<Vec<P>> for MedianEnsemble<P> {
    type Error = Error;

    fn try_from(members: Vec<P>) -> Result<Self, Self::Error> {
        Self::new(members)
    }
}

impl<P> From<MedianEnsemble<P>> for Vec<P> {
    fn from(ensemble: MedianEnsemble<P>) -> Self {
        ensemble.members
    }
}

impl<P: Predictor> Predictor for MedianEnsemble<P> {
    type Error = P::Error;

    fn predict(&self, conditions: &Conditions) -> Result<Slope, Self::Error> {
        let mut biomass = Vec::with_capacity(self.members.len());
        let mut soil_depth = Vec::with_capacity(self.members.len());

        for member in &self.members {
            let slope = member.predict(conditions)?;
            biomass.push(slope.biomass);
            soil_depth.push(slope.soil_depth);
        }

        Ok(Slope::new(
            Data::new(biomass).median(),
            Data::new(soil_depth).median(),
        ))
    }
}
