//! Composition profiles for stratified dataset generation
//!
//! Each [`CompositionClass`] fixes which side of the CH₄ and O₃ thresholds its
//! draws fall on. Together the four classes cover the 2×2 presence space exactly
//! once. Background species (H₂O, CO, CO₂, NH₃) share the same bounds in every
//! class so they carry no label information.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CompositionError;
use crate::label::{BiosignatureLabel, BiosignatureThresholds};
use crate::species::GasSpecies;

/// Closed log-abundance interval `[lower, upper]` in log10 partial-pressure fraction
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AbundanceBounds {
    pub lower: f64,
    pub upper: f64,
}

impl AbundanceBounds {
    pub const fn new(lower: f64, upper: f64) -> Self {
        Self { lower, upper }
    }

    pub fn width(&self) -> f64 {
        self.upper - self.lower
    }

    pub fn contains(&self, value: f64) -> bool {
        (self.lower..=self.upper).contains(&value)
    }

    /// Shrink both ends inward by `fraction` of the width
    pub fn interior(&self, fraction: f64) -> Self {
        let inset = self.width() * fraction.clamp(0.0, 0.5);
        Self::new(self.lower + inset, self.upper - inset)
    }
}

/// The four stratification classes
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CompositionClass {
    /// CH₄ and O₃ both above threshold
    Biosignature,
    /// Only CH₄ above threshold
    NonbioCh4,
    /// Only O₃ above threshold
    NonbioO3,
    /// Neither above threshold
    NonbioNone,
}

impl CompositionClass {
    pub const ALL: [CompositionClass; 4] = [
        CompositionClass::Biosignature,
        CompositionClass::NonbioCh4,
        CompositionClass::NonbioO3,
        CompositionClass::NonbioNone,
    ];

    /// Identifier used in generation plans and the `profile` column
    pub fn name(&self) -> &'static str {
        match self {
            Self::Biosignature => "biosignature",
            Self::NonbioCh4 => "nonbio_ch4",
            Self::NonbioO3 => "nonbio_o3",
            Self::NonbioNone => "nonbio_none",
        }
    }

    /// Intended (CH₄ present, O₃ present) pattern
    pub fn presence(&self) -> (bool, bool) {
        match self {
            Self::Biosignature => (true, true),
            Self::NonbioCh4 => (true, false),
            Self::NonbioO3 => (false, true),
            Self::NonbioNone => (false, false),
        }
    }

    /// Label a draw from this class should receive when sampled away from the thresholds
    pub fn intended_label(&self) -> BiosignatureLabel {
        match self.presence() {
            (true, true) => BiosignatureLabel::Yes,
            _ => BiosignatureLabel::No,
        }
    }
}

impl FromStr for CompositionClass {
    type Err = CompositionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|class| class.name() == s)
            .ok_or_else(|| CompositionError::UnknownClass(s.to_string()))
    }
}

impl fmt::Display for CompositionClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Inputs that determine the four profiles
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProfileSettings {
    pub thresholds: BiosignatureThresholds,
    /// Gap kept between "above" and "below" ranges on each side of a threshold
    pub margin: f64,
    pub h2o: AbundanceBounds,
    pub co: AbundanceBounds,
    pub co2: AbundanceBounds,
    pub nh3: AbundanceBounds,
    /// Lowest CH₄ drawn when CH₄ is meant to be absent
    pub ch4_floor: f64,
    /// Highest CH₄ drawn when CH₄ is meant to be present
    pub ch4_ceiling: f64,
    pub o3_floor: f64,
    pub o3_ceiling: f64,
}

impl Default for ProfileSettings {
    fn default() -> Self {
        Self {
            thresholds: BiosignatureThresholds::default(),
            margin: 0.0,
            h2o: AbundanceBounds::new(-10.0, -1.0),
            co: AbundanceBounds::new(-9.0, -3.0),
            co2: AbundanceBounds::new(-9.0, -3.0),
            nh3: AbundanceBounds::new(-9.0, -3.0),
            ch4_floor: -9.0,
            ch4_ceiling: -3.0,
            o3_floor: -10.0,
            o3_ceiling: -1.0,
        }
    }
}

impl ProfileSettings {
    fn above(&self, threshold: f64, ceiling: f64) -> AbundanceBounds {
        AbundanceBounds::new(threshold + self.margin, ceiling)
    }

    fn below(&self, threshold: f64, floor: f64) -> AbundanceBounds {
        AbundanceBounds::new(floor, threshold - self.margin)
    }

    fn profile_for(&self, class: CompositionClass) -> CompositionProfile {
        let (ch4_present, o3_present) = class.presence();
        let t = self.thresholds;

        let ch4 = if ch4_present {
            self.above(t.ch4, self.ch4_ceiling)
        } else {
            self.below(t.ch4, self.ch4_floor)
        };
        let o3 = if o3_present {
            self.above(t.o3, self.o3_ceiling)
        } else {
            self.below(t.o3, self.o3_floor)
        };

        let bounds = BTreeMap::from([
            (GasSpecies::H2O, self.h2o),
            (GasSpecies::CO, self.co),
            (GasSpecies::CO2, self.co2),
            (GasSpecies::NH3, self.nh3),
            (GasSpecies::CH4, ch4),
            (GasSpecies::O3, o3),
        ]);

        CompositionProfile { class, bounds }
    }
}

/// Log-abundance bounds for every species of one class
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompositionProfile {
    pub class: CompositionClass,
    pub bounds: BTreeMap<GasSpecies, AbundanceBounds>,
}

impl CompositionProfile {
    pub fn get(&self, species: GasSpecies) -> Option<&AbundanceBounds> {
        self.bounds.get(&species)
    }

    pub fn iter(&self) -> impl Iterator<Item = (GasSpecies, AbundanceBounds)> + '_ {
        self.bounds.iter().map(|(species, bounds)| (*species, *bounds))
    }

    /// (CH₄ present, O₃ present) pattern implied by the bounds themselves
    ///
    /// A species counts as present when its whole range sits at or above the
    /// threshold.
    pub fn presence(&self, thresholds: &BiosignatureThresholds) -> (bool, bool) {
        let above = |species: GasSpecies, threshold: f64| {
            self.get(species).is_some_and(|b| b.lower >= threshold)
        };
        (
            above(GasSpecies::CH4, thresholds.ch4),
            above(GasSpecies::O3, thresholds.o3),
        )
    }

    fn validate(&self) -> Result<(), CompositionError> {
        for (species, bounds) in self.iter() {
            if !bounds.lower.is_finite() || !bounds.upper.is_finite() {
                return Err(CompositionError::NonFiniteBound {
                    class: self.class.name().to_string(),
                    species,
                });
            }
            if bounds.lower > bounds.upper {
                return Err(CompositionError::InvertedBounds {
                    class: self.class.name().to_string(),
                    species,
                    lower: bounds.lower,
                    upper: bounds.upper,
                });
            }
        }
        Ok(())
    }
}

/// The validated set of four profiles built from one [`ProfileSettings`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileSet {
    settings: ProfileSettings,
    profiles: BTreeMap<CompositionClass, CompositionProfile>,
}

impl ProfileSet {
    /// Build and validate all four profiles
    ///
    /// # Examples
    /// ```
    /// use composition::{CompositionClass, GasSpecies, ProfileSet, ProfileSettings};
    ///
    /// let set = ProfileSet::build(ProfileSettings::default()).unwrap();
    /// let bio = set.get(CompositionClass::Biosignature);
    /// assert_eq!(bio.get(GasSpecies::CH4).unwrap().lower, -6.0);
    /// ```
    pub fn build(settings: ProfileSettings) -> Result<Self, CompositionError> {
        if settings.margin.is_nan() || settings.margin < 0.0 {
            return Err(CompositionError::NegativeMargin(settings.margin));
        }

        let profiles = CompositionClass::ALL
            .into_iter()
            .map(|class| {
                let profile = settings.profile_for(class);
                profile.validate().map(|()| (class, profile))
            })
            .collect::<Result<BTreeMap<_, _>, _>>()?;

        Ok(Self { settings, profiles })
    }

    pub fn settings(&self) -> &ProfileSettings {
        &self.settings
    }

    pub fn thresholds(&self) -> &BiosignatureThresholds {
        &self.settings.thresholds
    }

    pub fn get(&self, class: CompositionClass) -> &CompositionProfile {
        // Every class is inserted by `build`
        &self.profiles[&class]
    }

    /// Resolve a plan entry name to its profile; unknown names are fatal
    pub fn lookup(&self, name: &str) -> Result<&CompositionProfile, CompositionError> {
        let class: CompositionClass = name.parse()?;
        Ok(self.get(class))
    }

    pub fn iter(&self) -> impl Iterator<Item = &CompositionProfile> {
        self.profiles.values()
    }
}
