//! # Design Record
//!
//! `DesignRecord` bundles everything one beam design needs: project details,
//! the four shared inputs, the selected reinforcement and the inputs of the
//! two checkers. It is plain JSON so a front end can store it however it
//! likes; this crate never touches the filesystem.
//!
//! ## Structure
//!
//! ```text
//! DesignRecord
//! ├── id, version, created, modified
//! ├── project_info: ProjectInfo (job, client, designer, beam mark)
//! ├── design_forces / beam_geometry / material_properties
//! ├── final_reinforcement: Option<FinalReinforcement>
//! └── check_inputs / sls_inputs
//! ```
//!
//! ## Example
//!
//! ```rust
//! use rc_core::record::DesignRecord;
//!
//! let record = DesignRecord::new("Level 2 transfer beam", "P-104");
//! let json = record.to_json().unwrap();
//!
//! let loaded = DesignRecord::from_json(&json).unwrap();
//! assert_eq!(loaded.project_info.project_no, "P-104");
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::calculations::{
    run_detailed_check, run_sls_check, BeamGeometry, CheckResult, DesignForces, DesignOption, DetailedCheckInputs,
    FinalReinforcement, SlsInputs, SlsOutcome,
};
use crate::errors::CalcResult;
use crate::materials::MaterialProperties;

/// Current schema version for design records
pub const SCHEMA_VERSION: &str = "0.1.0";

/// Design standards the checks are written against
pub const DEFAULT_CODE_STANDARD: &str = "NZS3101, NZS4230";

/// One beam design.
///
/// Missing sub-objects fall back to their defaults on load, so a record
/// holding only `design_forces` is still valid input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DesignRecord {
    pub id: Uuid,

    /// Schema version (for migration compatibility)
    pub version: String,

    pub project_info: ProjectInfo,

    pub code_standard: String,

    pub design_forces: DesignForces,

    pub beam_geometry: BeamGeometry,

    pub material_properties: MaterialProperties,

    /// The layout picked from the options list, if any
    pub final_reinforcement: Option<FinalReinforcement>,

    pub check_inputs: DetailedCheckInputs,

    pub sls_inputs: SlsInputs,

    pub created: DateTime<Utc>,

    pub modified: DateTime<Utc>,
}

impl DesignRecord {
    /// Create a record with default inputs for a named project.
    pub fn new(project_name: impl Into<String>, project_no: impl Into<String>) -> Self {
        DesignRecord {
            project_info: ProjectInfo {
                project_name: project_name.into(),
                project_no: project_no.into(),
                ..ProjectInfo::default()
            },
            ..DesignRecord::default()
        }
    }

    /// Parse a record from JSON.
    pub fn from_json(json: &str) -> CalcResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Pretty-printed JSON.
    pub fn to_json(&self) -> CalcResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Update the modified timestamp.
    pub fn touch(&mut self) {
        self.modified = Utc::now();
    }

    /// Make a generated option the record's reinforcement.
    pub fn select_option(&mut self, option: &DesignOption) {
        self.final_reinforcement = Some(option.to_reinforcement());
        self.touch();
    }

    /// Detailed check of the record's reinforcement.
    pub fn detailed_check(&self) -> CalcResult<Vec<CheckResult>> {
        run_detailed_check(
            &self.design_forces,
            &self.beam_geometry,
            &self.material_properties,
            self.final_reinforcement.as_ref(),
            &self.check_inputs,
        )
    }

    /// Serviceability check of the record's reinforcement.
    pub fn sls_check(&self) -> CalcResult<SlsOutcome> {
        run_sls_check(
            &self.design_forces,
            &self.beam_geometry,
            &self.material_properties,
            self.final_reinforcement.as_ref(),
            &self.sls_inputs,
        )
    }
}

impl Default for DesignRecord {
    fn default() -> Self {
        let now = Utc::now();
        DesignRecord {
            id: Uuid::new_v4(),
            version: SCHEMA_VERSION.to_string(),
            project_info: ProjectInfo::default(),
            code_standard: DEFAULT_CODE_STANDARD.to_string(),
            design_forces: DesignForces::default(),
            beam_geometry: BeamGeometry::default(),
            material_properties: MaterialProperties::default(),
            final_reinforcement: Some(FinalReinforcement::default()),
            check_inputs: DetailedCheckInputs::default(),
            sls_inputs: SlsInputs::default(),
            created: now,
            modified: now,
        }
    }
}

/// Title block details printed on a calc sheet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectInfo {
    pub project_name: String,
    pub project_no: String,
    pub client: String,
    /// Issue date, e.g. "2025-03-14"
    pub date: String,
    pub designer: String,
    pub beam_mark: String,
    pub note: String,
}

impl Default for ProjectInfo {
    fn default() -> Self {
        ProjectInfo {
            project_name: "My RC Beam Project".to_string(),
            project_no: "P-001".to_string(),
            client: "Client Name".to_string(),
            date: Utc::now().format("%Y-%m-%d").to_string(),
            designer: "Your Name".to_string(),
            beam_mark: "BM1".to_string(),
            note: String::new(),
        }
    }
}
