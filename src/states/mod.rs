//! State transformer registry.
//!
//! One module per supported state, each exposing its input `FORMAT` and a
//! transformer implementing [`FieldExtractor`].

pub mod co;
pub mod de;
pub mod fl;
pub mod mi;
pub mod nc;
pub mod nj;
pub mod ny;
pub mod oh;
pub mod ok;
pub mod pa;
pub mod ut;
pub mod vt;
pub mod wa;

#[cfg(test)]
pub mod tests;

use crate::address::AddressParser;
use crate::config::StateFormat;
use crate::extract::FieldExtractor;
use crate::models::StateCode;
use pa::ZoneColumns;
use std::sync::Arc;

/// Side data a preparer collects before rows are transformed
#[derive(Debug, Clone, Default)]
pub struct TransformerOptions {
    /// Pennsylvania district column assignments from the Zone Types files
    pub zone_columns: Option<ZoneColumns>,
}

impl TransformerOptions {
    pub fn with_zone_columns(mut self, zones: ZoneColumns) -> Self {
        self.zone_columns = Some(zones);
        self
    }
}

/// Input format for a state
pub fn format_for(state: StateCode) -> &'static StateFormat {
    match state {
        StateCode::Co => &co::FORMAT,
        StateCode::De => &de::FORMAT,
        StateCode::Fl => &fl::FORMAT,
        StateCode::Mi => &mi::FORMAT,
        StateCode::Nc => &nc::FORMAT,
        StateCode::Nj => &nj::FORMAT,
        StateCode::Ny => &ny::FORMAT,
        StateCode::Oh => &oh::FORMAT,
        StateCode::Ok => &ok::FORMAT,
        StateCode::Pa => &pa::FORMAT,
        StateCode::Ut => &ut::FORMAT,
        StateCode::Vt => &vt::FORMAT,
        StateCode::Wa => &wa::FORMAT,
    }
}

/// Build the transformer for a state
pub fn transformer_for(
    state: StateCode,
    parser: Arc<AddressParser>,
    options: TransformerOptions,
) -> Box<dyn FieldExtractor + Send> {
    match state {
        StateCode::Co => Box::new(co::ColoradoTransformer::new(parser)),
        StateCode::De => Box::new(de::DelawareTransformer::new(parser)),
        StateCode::Fl => Box::new(fl::FloridaTransformer::new(parser)),
        StateCode::Mi => Box::new(mi::MichiganTransformer::new(parser)),
        StateCode::Nc => Box::new(nc::NorthCarolinaTransformer::new(parser)),
        StateCode::Nj => Box::new(nj::NewJerseyTransformer::new(parser)),
        StateCode::Ny => Box::new(ny::NewYorkTransformer::new(parser)),
        StateCode::Oh => Box::new(oh::OhioTransformer::new(parser)),
        StateCode::Ok => Box::new(ok::OklahomaTransformer::new(parser)),
        StateCode::Pa => Box::new(pa::PennsylvaniaTransformer::new(
            parser,
            options.zone_columns.unwrap_or_default(),
        )),
        StateCode::Ut => Box::new(ut::UtahTransformer::new(parser)),
        StateCode::Vt => Box::new(vt::VermontTransformer::new(parser)),
        StateCode::Wa => Box::new(wa::WashingtonTransformer::new(parser)),
    }
}
