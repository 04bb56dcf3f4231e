//! # Type Classifier
//!
//! Maps the five stored QR type tags onto the two kinds the rest of the
//! engine switches on.
//!
//! ```text
//! INDIVIDUAL ─┐
//! PERSONAL  ──┴──► QrKind::Individual   (at most one staff member)
//!
//! TEAM  ──┐
//! TABLE ──┼──────► QrKind::Team         (a list of recipients)
//! VENUE ──┘
//! ```
//!
//! This is the only place legacy spellings are interpreted. The resolver and
//! the update validator never match on [`QrType`] directly.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::types::QrType;

/// Semantic kind of a QR code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum QrKind {
    /// Bound to at most one staff member.
    Individual,
    /// Bound to a set of staff members who can each receive a tip.
    Team,
}

/// Classifies a stored tag. Total over the closed tag set.
#[inline]
pub fn classify(qr_type: QrType) -> QrKind {
    match qr_type {
        QrType::Individual | QrType::Personal => QrKind::Individual,
        QrType::Team | QrType::Table | QrType::Venue => QrKind::Team,
    }
}

impl QrType {
    /// Semantic kind of this tag. See [`classify`].
    #[inline]
    pub fn kind(self) -> QrKind {
        classify(self)
    }

    /// True for the deprecated aliases kept alive for printed codes.
    pub fn is_legacy(self) -> bool {
        matches!(self, QrType::Personal | QrType::Table | QrType::Venue)
    }

    /// The current tag of the same kind. Used when issuing new codes.
    pub fn canonical(self) -> QrType {
        match classify(self) {
            QrKind::Individual => QrType::Individual,
            QrKind::Team => QrType::Team,
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn any_qr_type() -> impl Strategy<Value = QrType> {
        prop::sample::select(QrType::ALL.to_vec())
    }

    #[test]
    fn test_individual_like_tags() {
        assert_eq!(classify(QrType::Individual), QrKind::Individual);
        assert_eq!(classify(QrType::Personal), QrKind::Individual);
    }

    #[test]
    fn test_team_like_tags() {
        assert_eq!(classify(QrType::Team), QrKind::Team);
        assert_eq!(classify(QrType::Table), QrKind::Team);
        assert_eq!(classify(QrType::Venue), QrKind::Team);
    }

    #[test]
    fn test_kinds_partition_the_tag_set() {
        let individual: Vec<_> = QrType::ALL
            .into_iter()
            .filter(|t| t.kind() == QrKind::Individual)
            .collect();
        let team: Vec<_> = QrType::ALL
            .into_iter()
            .filter(|t| t.kind() == QrKind::Team)
            .collect();

        assert_eq!(individual, vec![QrType::Individual, QrType::Personal]);
        assert_eq!(team, vec![QrType::Team, QrType::Table, QrType::Venue]);
        assert_eq!(individual.len() + team.len(), QrType::ALL.len());
    }

    #[test]
    fn test_legacy_and_canonical() {
        assert!(!QrType::Individual.is_legacy());
        assert!(!QrType::Team.is_legacy());
        assert!(QrType::Personal.is_legacy());
        assert!(QrType::Table.is_legacy());
        assert!(QrType::Venue.is_legacy());

        assert_eq!(QrType::Personal.canonical(), QrType::Individual);
        assert_eq!(QrType::Table.canonical(), QrType::Team);
        assert_eq!(QrType::Venue.canonical(), QrType::Team);
    }

    proptest! {
        #[test]
        fn prop_classification_is_stable(qr_type in any_qr_type()) {
            prop_assert_eq!(classify(qr_type), classify(qr_type));
        }

        #[test]
        fn prop_canonical_preserves_kind(qr_type in any_qr_type()) {
            prop_assert_eq!(qr_type.canonical().kind(), qr_type.kind());
            prop_assert!(!qr_type.canonical().is_legacy());
        }
    }
}
