use serde::{Deserialize, Serialize};
use std::{fmt::Display, str::FromStr};

use super::AudioFeatures;
use crate::error::AppError;

/// Mood the listener asked for
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum Mood {
    #[default]
    Any,
    Happy,
    Sad,
    Energetic,
    Chill,
}

impl Mood {
    pub const ALL: [Mood; 5] = [Mood::Any, Mood::Happy, Mood::Sad, Mood::Energetic, Mood::Chill];

    /// Whether a track with these features fits the mood.
    ///
    /// Each threshold supplies its own default for a missing feature value.
    pub fn admits(&self, features: &AudioFeatures) -> bool {
        match self {
            Mood::Any => true,
            Mood::Happy => features.valence.unwrap_or(0.0) >= 0.6,
            Mood::Sad => features.valence.unwrap_or(1.0) <= 0.4,
            Mood::Energetic => features.energy.unwrap_or(0.0) >= 0.6,
            Mood::Chill => features.energy.unwrap_or(1.0) <= 0.4,
        }
    }

    /// Parses a user supplied label, falling back to `Any` for unknown values
    pub fn from_label(label: Option<&str>) -> Self {
        parse_or_any(label, "mood")
    }
}

impl Display for Mood {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Mood::Any => "Any",
            Mood::Happy => "Happy",
            Mood::Sad => "Sad",
            Mood::Energetic => "Energetic",
            Mood::Chill => "Chill",
        };
        write!(f, "{}", label)
    }
}

impl FromStr for Mood {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Mood::ALL
            .into_iter()
            .find(|mood| mood.to_string().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| AppError::InvalidInput(format!("Unknown mood '{}'", s)))
    }
}

/// Activity the listener is doing
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum Activity {
    #[default]
    Any,
    Workout,
    Study,
    Party,
    Relax,
}

impl Activity {
    pub const ALL: [Activity; 5] = [
        Activity::Any,
        Activity::Workout,
        Activity::Study,
        Activity::Party,
        Activity::Relax,
    ];

    /// Whether a track with these features suits the activity
    pub fn admits(&self, features: &AudioFeatures) -> bool {
        match self {
            Activity::Any => true,
            Activity::Workout => features.tempo.unwrap_or(0.0) >= 100.0,
            Activity::Study => features.acousticness.unwrap_or(1.0) >= 0.3,
            Activity::Party => features.danceability.unwrap_or(0.0) >= 0.6,
            Activity::Relax => features.acousticness.unwrap_or(1.0) >= 0.5,
        }
    }

    pub fn from_label(label: Option<&str>) -> Self {
        parse_or_any(label, "activity")
    }
}

impl Display for Activity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Activity::Any => "Any",
            Activity::Workout => "Workout",
            Activity::Study => "Study",
            Activity::Party => "Party",
            Activity::Relax => "Relax",
        };
        write!(f, "{}", label)
    }
}

impl FromStr for Activity {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Activity::ALL
            .into_iter()
            .find(|activity| activity.to_string().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| AppError::InvalidInput(format!("Unknown activity '{}'", s)))
    }
}

fn parse_or_any<T>(label: Option<&str>, kind: &'static str) -> T
where
    T: FromStr<Err = AppError> + Default,
{
    match label {
        None => T::default(),
        Some(label) => label.parse().unwrap_or_else(|e: AppError| {
            tracing::warn!(kind, label = %label, error = %e, "Unrecognized filter value, using Any");
            T::default()
        }),
    }
}

/// Free-form genre preference
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum GenreFilter {
    #[default]
    Any,
    /// Trimmed label as the user typed it
    Named(String),
}

impl GenreFilter {
    /// Suggested values offered to clients; requests may use any label
    pub const SUGGESTED: [&'static str; 8] = [
        "Any",
        "Pop",
        "Rock",
        "Hip-Hop",
        "Jazz",
        "Classical",
        "Electronic",
        "Country",
    ];

    pub fn from_label(label: Option<&str>) -> Self {
        match label.map(str::trim) {
            None | Some("") => GenreFilter::Any,
            Some(label) if label.eq_ignore_ascii_case("any") => GenreFilter::Any,
            Some(label) => GenreFilter::Named(label.to_string()),
        }
    }

    pub fn is_active(&self) -> bool {
        matches!(self, GenreFilter::Named(_))
    }

    /// Case-insensitive substring match against any of the genre labels
    pub fn admits(&self, genres: &[String]) -> bool {
        match self {
            GenreFilter::Any => true,
            GenreFilter::Named(wanted) => {
                let needle = wanted.to_lowercase();
                genres.iter().any(|g| g.to_lowercase().contains(&needle))
            }
        }
    }
}

impl Display for GenreFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GenreFilter::Any => write!(f, "Any"),
            GenreFilter::Named(label) => write!(f, "{}", label),
        }
    }
}

/// Mood, activity and genre chosen for one recommendation request
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContextFilters {
    pub mood: Mood,
    pub activity: Activity,
    pub genre: GenreFilter,
}

impl ContextFilters {
    pub fn from_labels(mood: Option<&str>, activity: Option<&str>, genre: Option<&str>) -> Self {
        Self {
            mood: Mood::from_label(mood),
            activity: Activity::from_label(activity),
            genre: GenreFilter::from_label(genre),
        }
    }

    /// Mood and activity checks; genre needs a separate lookup
    pub fn admits_features(&self, features: &AudioFeatures) -> bool {
        self.mood.admits(features) && self.activity.admits(features)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn features() -> AudioFeatures {
        AudioFeatures::default()
    }

    #[test]
    fn test_happy_requires_high_valence() {
        let mut f = features();
        f.valence = Some(0.3);
        assert!(!Mood::Happy.admits(&f));
        f.valence = Some(0.6);
        assert!(Mood::Happy.admits(&f));
    }

    #[test]
    fn test_sad_and_chill_thresholds() {
        let mut f = features();
        f.valence = Some(0.41);
        f.energy = Some(0.4);
        assert!(!Mood::Sad.admits(&f));
        assert!(Mood::Chill.admits(&f));
    }

    #[test]
    fn test_missing_values_use_per_threshold_defaults() {
        let f = features();
        assert!(!Mood::Happy.admits(&f));
        assert!(!Mood::Sad.admits(&f));
        assert!(!Mood::Energetic.admits(&f));
        assert!(!Mood::Chill.admits(&f));
        assert!(!Activity::Workout.admits(&f));
        assert!(!Activity::Party.admits(&f));
        // acousticness defaults to 1.0
        assert!(Activity::Study.admits(&f));
        assert!(Activity::Relax.admits(&f));
    }

    #[test]
    fn test_activity_thresholds() {
        let f = AudioFeatures {
            tempo: Some(99.9),
            acousticness: Some(0.4),
            danceability: Some(0.7),
            ..Default::default()
        };
        assert!(!Activity::Workout.admits(&f));
        assert!(Activity::Study.admits(&f));
        assert!(!Activity::Relax.admits(&f));
        assert!(Activity::Party.admits(&f));
    }

    #[test]
    fn test_any_admits_everything() {
        assert!(Mood::Any.admits(&features()));
        assert!(Activity::Any.admits(&features()));
        assert!(GenreFilter::Any.admits(&[]));
    }

    #[test]
    fn test_genre_substring_is_case_insensitive() {
        let genres = vec!["Classic Rock".to_string(), "album rock".to_string()];
        assert!(GenreFilter::from_label(Some("rock")).admits(&genres));
        assert!(GenreFilter::from_label(Some("  ROCK ")).admits(&genres));
        assert!(!GenreFilter::from_label(Some("jazz")).admits(&genres));
        assert!(!GenreFilter::from_label(Some("pop")).admits(&[]));
    }

    #[test]
    fn test_genre_any_labels() {
        assert_eq!(GenreFilter::from_label(None), GenreFilter::Any);
        assert_eq!(GenreFilter::from_label(Some("")), GenreFilter::Any);
        assert_eq!(GenreFilter::from_label(Some("any")), GenreFilter::Any);
        assert!(GenreFilter::from_label(Some("Hip-Hop")).is_active());
    }

    #[test]
    fn test_labels_parse_case_insensitively() {
        assert_eq!("happy".parse::<Mood>().unwrap(), Mood::Happy);
        assert_eq!(" Workout ".parse::<Activity>().unwrap(), Activity::Workout);
        assert!("ecstatic".parse::<Mood>().is_err());
    }

    #[test]
    fn test_unknown_label_falls_back_to_any() {
        let filters = ContextFilters::from_labels(Some("ecstatic"), Some("Study"), None);
        assert_eq!(filters.mood, Mood::Any);
        assert_eq!(filters.activity, Activity::Study);
        assert_eq!(filters.genre, GenreFilter::Any);
    }
}
