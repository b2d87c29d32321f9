//
// Party colour semantics for the map overlay and the seat chart. The map
// layer colours a district by the compact party code stored on its feature
// ("D", "R", anything else).
//

use crate::defs::PartyBucket;
use std::fmt;

#[derive(Debug, PartialEq, Clone, Copy, Serialize)]
pub struct Rgba(pub u8, pub u8, pub u8, pub f32);

impl fmt::Display for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "rgba({}, {}, {}, {})", self.0, self.1, self.2, self.3)
    }
}

#[derive(Debug, PartialEq, Clone, Copy, Serialize)]
pub struct FeatureStyle {
    pub fill: Rgba,
    pub stroke: Rgba,
    pub stroke_width: u32,
}

pub fn feature_style(party_code: Option<&str>, selected: bool) -> FeatureStyle {
    let code = party_code.unwrap_or("");
    if selected {
        let fill = match code {
            "D" => Rgba(100, 100, 255, 0.3),
            "R" => Rgba(255, 100, 100, 0.3),
            _ => Rgba(164, 164, 164, 0.3),
        };
        FeatureStyle {
            fill,
            stroke: Rgba(0, 0, 0, 1.0),
            stroke_width: 3,
        }
    } else {
        let fill = match code {
            "D" => Rgba(0, 0, 255, 0.3),
            "R" => Rgba(255, 0, 0, 0.3),
            _ => Rgba(96, 96, 96, 0.3),
        };
        FeatureStyle {
            fill,
            stroke: Rgba(0, 0, 0, 0.4),
            stroke_width: 2,
        }
    }
}

impl PartyBucket {
    pub fn theme_color(self) -> &'static str {
        match self {
            PartyBucket::Democratic => "#0042ca",
            PartyBucket::Republican => "#e9141e",
            PartyBucket::Other => "#78716c",
        }
    }

    pub fn seat_class(self) -> &'static str {
        match self {
            PartyBucket::Democratic => "bg-democrat",
            PartyBucket::Republican => "bg-republican",
            PartyBucket::Other => "bg-other",
        }
    }

    // which badge the district panel shows for the winner
    pub fn badge(self) -> &'static str {
        match self {
            PartyBucket::Democratic => "democrat",
            PartyBucket::Republican => "republican",
            PartyBucket::Other => "independent",
        }
    }
}
