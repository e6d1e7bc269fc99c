use crate::{
    error::{AppError, AppResult},
    models::TrackRecord,
};

/// Square matrix of pairwise similarity scores, stored row-major
#[derive(Debug, Clone)]
pub struct SimilarityIndex {
    size: usize,
    scores: Vec<f64>,
}

impl SimilarityIndex {
    /// Builds the index from matrix rows, rejecting ragged or non-finite input
    pub fn from_rows(rows: Vec<Vec<f64>>) -> AppResult<Self> {
        let size = rows.len();
        let mut scores = Vec::with_capacity(size * size);

        for (i, row) in rows.into_iter().enumerate() {
            if row.len() != size {
                return Err(AppError::Catalog(format!(
                    "Similarity row {} has {} columns, expected {}",
                    i,
                    row.len(),
                    size
                )));
            }
            if let Some(j) = row.iter().position(|score| !score.is_finite()) {
                return Err(AppError::Catalog(format!(
                    "Similarity score at ({}, {}) is not a finite number",
                    i, j
                )));
            }
            scores.extend(row);
        }

        Ok(Self { size, scores })
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// Scores of track `position` against every track, by column
    pub fn row(&self, position: usize) -> Option<&[f64]> {
        if position >= self.size {
            return None;
        }
        let start = position * self.size;
        Some(&self.scores[start..start + self.size])
    }
}

/// Track records aligned with the rows of a similarity index.
///
/// Built once at startup and shared read-only between requests.
#[derive(Debug, Clone)]
pub struct Catalog {
    tracks: Vec<TrackRecord>,
    similarity: SimilarityIndex,
}

impl Catalog {
    pub fn new(tracks: Vec<TrackRecord>, similarity: SimilarityIndex) -> AppResult<Self> {
        if tracks.len() != similarity.size() {
            return Err(AppError::Catalog(format!(
                "{} track records but similarity index is {}x{}",
                tracks.len(),
                similarity.size(),
                similarity.size()
            )));
        }

        Ok(Self { tracks, similarity })
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    pub fn tracks(&self) -> &[TrackRecord] {
        &self.tracks
    }

    pub fn track(&self, position: usize) -> Option<&TrackRecord> {
        self.tracks.get(position)
    }

    pub fn similarity_row(&self, position: usize) -> Option<&[f64]> {
        self.similarity.row(position)
    }

    /// Index position of a song.
    ///
    /// Titles are not unique across artists: without an artist the first
    /// record with that title wins; with one, only the exact pair matches.
    pub fn position_of(&self, song: &str, artist: Option<&str>) -> AppResult<usize> {
        self.tracks
            .iter()
            .position(|track| {
                track.song == song && artist.map_or(true, |artist| track.artist == artist)
            })
            .ok_or_else(|| match artist {
                Some(artist) => {
                    AppError::NotFound(format!("Song '{}' by '{}' is not in the catalog", song, artist))
                }
                None => AppError::NotFound(format!("Song '{}' is not in the catalog", song)),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> Catalog {
        let tracks = vec![
            TrackRecord::new("Home", "Michael Buble"),
            TrackRecord::new("Halo", "Beyonce"),
            TrackRecord::new("Home", "Daughtry"),
        ];
        let similarity = SimilarityIndex::from_rows(vec![
            vec![1.0, 0.2, 0.7],
            vec![0.2, 1.0, 0.1],
            vec![0.7, 0.1, 1.0],
        ])
        .unwrap();
        Catalog::new(tracks, similarity).unwrap()
    }

    #[test]
    fn test_first_match_wins_without_artist() {
        assert_eq!(catalog().position_of("Home", None).unwrap(), 0);
    }

    #[test]
    fn test_artist_disambiguates_title() {
        assert_eq!(catalog().position_of("Home", Some("Daughtry")).unwrap(), 2);
    }

    #[test]
    fn test_unknown_song_is_not_found() {
        let result = catalog().position_of("Crazy", None);
        assert!(matches!(result, Err(AppError::NotFound(_))));

        let result = catalog().position_of("Halo", Some("Daughtry"));
        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[test]
    fn test_similarity_row_lookup() {
        let catalog = catalog();
        assert_eq!(catalog.similarity_row(1), Some(&[0.2, 1.0, 0.1][..]));
        assert_eq!(catalog.similarity_row(3), None);
    }

    #[test]
    fn test_ragged_matrix_rejected() {
        let result = SimilarityIndex::from_rows(vec![vec![1.0, 0.5], vec![0.5]]);
        assert!(matches!(result, Err(AppError::Catalog(_))));
    }

    #[test]
    fn test_non_finite_score_rejected() {
        let result = SimilarityIndex::from_rows(vec![vec![1.0, f64::NAN], vec![0.5, 1.0]]);
        assert!(matches!(result, Err(AppError::Catalog(_))));
    }

    #[test]
    fn test_misaligned_tracks_rejected() {
        let similarity = SimilarityIndex::from_rows(vec![vec![1.0]]).unwrap();
        let tracks = vec![TrackRecord::new("A", "a"), TrackRecord::new("B", "b")];
        assert!(matches!(
            Catalog::new(tracks, similarity),
            Err(AppError::Catalog(_))
        ));
    }

    #[test]
    fn test_empty_catalog_is_valid() {
        let catalog = Catalog::new(vec![], SimilarityIndex::from_rows(vec![]).unwrap()).unwrap();
        assert!(catalog.is_empty());
        assert!(catalog.position_of("Anything", None).is_err());
    }
}
