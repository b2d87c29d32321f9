use crate::data::features::FeatureAttributes;
use crate::defs::DistrictId;
use crate::engine::aggregate;
use crate::error::{Error, Result};
use crate::presentation::{DistrictViewModel, Formatter};
use crate::store::DistrictIndex;

// what the map hands over when a district is clicked
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    pub district: DistrictId,
    pub detail_url: Option<String>,
}

impl Selection {
    pub fn new(district: DistrictId) -> Selection {
        Selection {
            district,
            detail_url: None,
        }
    }

    pub fn from_feature(feature: &FeatureAttributes) -> Selection {
        Selection {
            district: feature.district.clone(),
            detail_url: feature.url.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SelectionView {
    // nothing selected: hide the result panels, show the placeholder
    Empty,
    District(DistrictViewModel),
}

/// Joins map selections to the loaded results.
///
/// Only constructible from a loaded index, so selections cannot be
/// handled before the data is available.
pub struct SelectionBridge<'a> {
    index: &'a DistrictIndex,
    formatter: Formatter,
}

impl<'a> SelectionBridge<'a> {
    pub fn new(index: &'a DistrictIndex, formatter: Formatter) -> SelectionBridge<'a> {
        SelectionBridge { index, formatter }
    }

    pub fn index(&self) -> &'a DistrictIndex {
        self.index
    }

    pub fn formatter(&self) -> &Formatter {
        &self.formatter
    }

    pub fn view(&self, district: &DistrictId) -> Result<DistrictViewModel> {
        let candidates = match self.index.get(district) {
            Some(c) => c,
            None => return Err(Error::UnknownDistrict(district.clone())),
        };
        let result = aggregate(candidates)?;
        Ok(self.formatter.format(&result))
    }

    pub fn on_select(&self, selection: Option<&Selection>) -> Result<SelectionView> {
        let selection = match selection {
            Some(s) => s,
            None => {
                log::debug!("selection cleared");
                return Ok(SelectionView::Empty);
            }
        };
        log::debug!("district {} selected", selection.district);
        let mut view = self.view(&selection.district)?;
        view.detail_url = selection.detail_url.clone();
        Ok(SelectionView::District(view))
    }
}
