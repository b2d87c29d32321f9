use crate::defs::*;
use crate::engine::AggregationResult;
use itertools::Itertools;
use num_format::{Locale, ToFormattedString};

// one party bucket's share bar
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PartyShare {
    pub bucket: PartyBucket,
    pub votes: u64,
    pub percentage: f64,
    pub visible: bool,
}

// everything the presentation layer needs to show one district
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DistrictViewModel {
    pub district: DistrictId,
    pub district_label: String,
    pub name: String,
    pub party: String,
    pub party_code: String,
    pub badge: PartyBucket,
    pub detail_url: Option<String>,
    pub narrative: String,
    pub shares: Vec<PartyShare>,
}

pub struct Formatter {
    locale: Locale,
    district_label: String,
}

impl Default for Formatter {
    fn default() -> Formatter {
        Formatter::new(Locale::en, "Senate District")
    }
}

impl Formatter {
    pub fn new(locale: Locale, district_label: &str) -> Formatter {
        Formatter {
            locale,
            district_label: district_label.to_string(),
        }
    }

    pub fn votes(&self, votes: u64) -> String {
        votes.to_formatted_string(&self.locale)
    }

    pub fn district_label(&self, district: &DistrictId) -> String {
        format!("{} {}", self.district_label, district)
    }

    /// The vote totals description: a headline sentence, one line per
    /// losing candidate in ranked order, then the winner's note.
    pub fn narrative(&self, result: &AggregationResult) -> String {
        let winner = result.winner;
        let mut text = if result.uncontested {
            format!(
                "{} ({}) ran uncontested in the {} election, receiving {} votes.",
                winner.name,
                winner.party_code(),
                winner.year(),
                self.votes(winner.votes)
            )
        } else {
            let headline = format!(
                "In the {} election, {} ({}) won with {} votes out of {} votes.",
                winner.year(),
                winner.name,
                winner.party_code(),
                self.votes(winner.votes),
                self.votes(result.total_votes)
            );
            let others = result.ranked_others.iter().map(|c| {
                format!("{} ({}) won {} votes.", c.name, c.party_code(), self.votes(c.votes))
            });
            std::iter::once(headline).chain(others).join("\n")
        };
        if let Some(note) = &winner.note {
            text.push_str("\n\n*");
            text.push_str(note);
        }
        text
    }

    pub fn format(&self, result: &AggregationResult) -> DistrictViewModel {
        let winner = result.winner;
        DistrictViewModel {
            district: result.district.clone(),
            district_label: self.district_label(result.district),
            name: winner.name.clone(),
            party: winner.party.clone(),
            party_code: winner.party_code().to_string(),
            badge: winner.bucket(),
            detail_url: None,
            narrative: self.narrative(result),
            shares: shares(&result.party_totals, result.total_votes),
        }
    }
}

// a district with no recorded votes has no meaningful share; every bar
// reports 0% and stays hidden
pub fn shares(totals: &PartyTotals, total_votes: u64) -> Vec<PartyShare> {
    PartyBucket::ALL
        .iter()
        .map(|&bucket| {
            let votes = totals.get(bucket);
            let percentage = if total_votes == 0 {
                0.0
            } else {
                votes as f64 * 100.0 / total_votes as f64
            };
            PartyShare {
                bucket,
                votes,
                percentage,
                visible: votes >= 1,
            }
        })
        .collect()
}
