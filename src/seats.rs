use crate::defs::PartyBucket;
use crate::engine::find_winner;
use crate::error::Result;
use crate::store::DistrictIndex;

/// The party bucket of each district's winner, in district discovery
/// order. Any district without exactly one winner fails the whole summary.
pub fn build_summary(index: &DistrictIndex) -> Result<Vec<PartyBucket>> {
    index
        .iter()
        .map(|(_, candidates)| {
            let (_, winner) = find_winner(candidates)?;
            Ok(winner.bucket())
        })
        .collect()
}

// chamber composition overview
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeatSummary {
    pub seats: Vec<PartyBucket>,
    pub democratic: usize,
    pub republican: usize,
    pub other: usize,
}

impl SeatSummary {
    pub fn build(index: &DistrictIndex) -> Result<SeatSummary> {
        let seats = build_summary(index)?;
        let count = |bucket: PartyBucket| seats.iter().filter(|&&s| s == bucket).count();
        Ok(SeatSummary {
            democratic: count(PartyBucket::Democratic),
            republican: count(PartyBucket::Republican),
            other: count(PartyBucket::Other),
            seats,
        })
    }

    pub fn seat_classes(&self) -> Vec<&'static str> {
        self.seats.iter().map(|s| s.seat_class()).collect()
    }
}
