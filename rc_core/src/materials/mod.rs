//! # Materials Database
//!
//! Grade reference data for concrete, concrete masonry and reinforcing steel,
//! and the resolved [`MaterialProperties`] a calculation consumes.
//!
//! The grade table is read-only reference data keyed by material kind and
//! grade name. A built-in table ships with the crate ([`GRADE_TABLE`]); a
//! caller can inject its own with [`MaterialGradeTable::from_json`].
//!
//! ## Example
//!
//! ```rust
//! use rc_core::materials::{MaterialKind, GRADE_TABLE};
//!
//! let c30 = GRADE_TABLE.grade(MaterialKind::Concrete, "C30").unwrap();
//! assert_eq!(c30.strength_mpa, 30.0);
//!
//! let steel = GRADE_TABLE.grade(MaterialKind::Rebar, "500E").unwrap();
//! assert_eq!(steel.modulus_mpa, 200_000.0);
//! ```

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::errors::{require_positive, CalcError, CalcResult};

/// Ultimate compressive strain of concrete used when a table omits it
pub const DEFAULT_CONCRETE_STRAIN: f64 = 0.003;

/// Reinforcement strain used for the balanced neutral axis when a table omits it
pub const DEFAULT_REBAR_STRAIN: f64 = 0.0025;

/// Built-in grade table, built once on first use.
pub static GRADE_TABLE: Lazy<MaterialGradeTable> = Lazy::new(MaterialGradeTable::builtin);

/// Material of the beam section itself
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SectionMaterialType {
    /// Cast-in-place reinforced concrete (NZS 3101)
    #[default]
    Concrete,
    /// Reinforced concrete masonry (NZS 4230)
    Masonry,
}

impl SectionMaterialType {
    /// Grade table kind holding grades for this section material
    pub fn kind(&self) -> MaterialKind {
        match self {
            SectionMaterialType::Concrete => MaterialKind::Concrete,
            SectionMaterialType::Masonry => MaterialKind::Masonry,
        }
    }
}

impl std::fmt::Display for SectionMaterialType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SectionMaterialType::Concrete => write!(f, "Concrete"),
            SectionMaterialType::Masonry => write!(f, "Masonry"),
        }
    }
}

/// Kinds of material held in the grade table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MaterialKind {
    Concrete,
    Masonry,
    Rebar,
}

impl MaterialKind {
    /// All kinds, in table order
    pub const ALL: [MaterialKind; 3] = [MaterialKind::Concrete, MaterialKind::Masonry, MaterialKind::Rebar];
}

impl std::fmt::Display for MaterialKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MaterialKind::Concrete => write!(f, "concrete"),
            MaterialKind::Masonry => write!(f, "masonry"),
            MaterialKind::Rebar => write!(f, "rebar"),
        }
    }
}

/// One named grade: strength (f'c, f'm or fy) and elastic modulus (Ec or Es)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GradeEntry {
    pub name: String,
    pub strength_mpa: f64,
    pub modulus_mpa: f64,
}

impl GradeEntry {
    fn new(name: &str, strength_mpa: f64, modulus_mpa: f64) -> Self {
        GradeEntry {
            name: name.to_string(),
            strength_mpa,
            modulus_mpa,
        }
    }
}

/// All grades of one material kind plus its ultimate strain
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaterialClass {
    #[serde(rename = "type")]
    pub kind: MaterialKind,
    pub strain: f64,
    #[serde(rename = "grade")]
    pub grades: Vec<GradeEntry>,
}

/// Grade reference table.
///
/// ## JSON Format
///
/// ```json
/// {
///   "material_properties": [
///     { "type": "concrete", "strain": 0.003,
///       "grade": [ { "name": "C30", "strength_mpa": 30.0, "modulus_mpa": 25084.0 } ] },
///     { "type": "rebar", "strain": 0.0025,
///       "grade": [ { "name": "500E", "strength_mpa": 500.0, "modulus_mpa": 200000.0 } ] }
///   ]
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaterialGradeTable {
    pub material_properties: Vec<MaterialClass>,
}

impl MaterialGradeTable {
    /// Grades shipped with the crate
    pub fn builtin() -> Self {
        MaterialGradeTable {
            material_properties: vec![
                MaterialClass {
                    kind: MaterialKind::Concrete,
                    strain: DEFAULT_CONCRETE_STRAIN,
                    grades: vec![
                        GradeEntry::new("C20", 20.0, 20481.0),
                        GradeEntry::new("C25", 25.0, 22898.0),
                        GradeEntry::new("C30", 30.0, 25084.0),
                        GradeEntry::new("C35", 35.0, 27094.0),
                        GradeEntry::new("C40", 40.0, 28965.0),
                        GradeEntry::new("C50", 50.0, 32383.0),
                    ],
                },
                MaterialClass {
                    kind: MaterialKind::Masonry,
                    strain: DEFAULT_CONCRETE_STRAIN,
                    // Em = 850·f'm
                    grades: vec![
                        GradeEntry::new("M12", 12.0, 10200.0),
                        GradeEntry::new("M15", 15.0, 12750.0),
                        GradeEntry::new("M17.5", 17.5, 14875.0),
                        GradeEntry::new("M20", 20.0, 17000.0),
                    ],
                },
                MaterialClass {
                    kind: MaterialKind::Rebar,
                    strain: DEFAULT_REBAR_STRAIN,
                    grades: vec![
                        GradeEntry::new("300E", 300.0, 200_000.0),
                        GradeEntry::new("500E", 500.0, 200_000.0),
                    ],
                },
            ],
        }
    }

    /// Parse a caller-supplied table.
    ///
    /// Every grade must have positive strength and modulus.
    pub fn from_json(json: &str) -> CalcResult<Self> {
        let table: MaterialGradeTable = serde_json::from_str(json)?;
        for class in &table.material_properties {
            require_positive(&format!("{}.strain", class.kind), class.strain)?;
            for grade in &class.grades {
                require_positive(&format!("{}.{}.strength_mpa", class.kind, grade.name), grade.strength_mpa)?;
                require_positive(&format!("{}.{}.modulus_mpa", class.kind, grade.name), grade.modulus_mpa)?;
            }
        }
        Ok(table)
    }

    fn class(&self, kind: MaterialKind) -> Option<&MaterialClass> {
        self.material_properties.iter().find(|c| c.kind == kind)
    }

    /// All grades of a kind (empty if the table has none)
    pub fn grades(&self, kind: MaterialKind) -> &[GradeEntry] {
        self.class(kind).map(|c| c.grades.as_slice()).unwrap_or(&[])
    }

    /// Look up a grade by name (case-insensitive)
    pub fn grade(&self, kind: MaterialKind, name: &str) -> CalcResult<&GradeEntry> {
        self.grades(kind)
            .iter()
            .find(|g| g.name.eq_ignore_ascii_case(name.trim()))
            .ok_or_else(|| CalcError::material_not_found(format!("{} grade '{}'", kind, name)))
    }

    /// Ultimate strain recorded for a kind, if the table has one
    pub fn ultimate_strain(&self, kind: MaterialKind) -> Option<f64> {
        self.class(kind).map(|c| c.strain)
    }

    /// Concrete strain for the balanced neutral axis, with the usual fallback
    pub fn concrete_strain(&self) -> f64 {
        self.ultimate_strain(MaterialKind::Concrete)
            .unwrap_or(DEFAULT_CONCRETE_STRAIN)
    }

    /// Reinforcement strain for the balanced neutral axis, with the usual fallback
    pub fn rebar_strain(&self) -> f64 {
        self.ultimate_strain(MaterialKind::Rebar)
            .unwrap_or(DEFAULT_REBAR_STRAIN)
    }
}

impl Default for MaterialGradeTable {
    fn default() -> Self {
        MaterialGradeTable::builtin()
    }
}

/// Resolved material properties for one beam.
///
/// The grade names are kept for reporting; the numeric values are what the
/// calculations use. For masonry sections `fc_mpa`/`ec_mpa` hold f'm and Em.
///
/// ## JSON Example
///
/// ```json
/// {
///   "section_material_type": "concrete",
///   "concrete_grade_name": "C30",
///   "fc_mpa": 30.0,
///   "ec_mpa": 25084.0,
///   "main_bar_grade_name": "500E",
///   "fy_mpa": 500.0,
///   "es_mpa": 200000.0,
///   "stirrup_grade_name": "300E",
///   "fys_mpa": 300.0,
///   "stirrup_es_mpa": 200000.0
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaterialProperties {
    pub section_material_type: SectionMaterialType,
    pub concrete_grade_name: String,
    /// f'c (or f'm) in MPa
    pub fc_mpa: f64,
    /// Ec (or Em) in MPa
    pub ec_mpa: f64,
    pub main_bar_grade_name: String,
    /// Main bar yield strength fy (MPa)
    pub fy_mpa: f64,
    /// Main bar modulus Es (MPa)
    pub es_mpa: f64,
    pub stirrup_grade_name: String,
    /// Stirrup yield strength fys (MPa)
    pub fys_mpa: f64,
    /// Stirrup modulus (MPa)
    pub stirrup_es_mpa: f64,
}

impl MaterialProperties {
    /// Resolve grade names against a grade table.
    ///
    /// # Example
    ///
    /// ```rust
    /// use rc_core::materials::{MaterialProperties, SectionMaterialType, GRADE_TABLE};
    ///
    /// let props = MaterialProperties::from_grades(
    ///     &GRADE_TABLE,
    ///     SectionMaterialType::Concrete,
    ///     "C40",
    ///     "500E",
    ///     "300E",
    /// ).unwrap();
    /// assert_eq!(props.fc_mpa, 40.0);
    /// assert_eq!(props.fys_mpa, 300.0);
    /// ```
    pub fn from_grades(
        table: &MaterialGradeTable,
        section_material_type: SectionMaterialType,
        section_grade: &str,
        main_bar_grade: &str,
        stirrup_grade: &str,
    ) -> CalcResult<Self> {
        let section = table.grade(section_material_type.kind(), section_grade)?;
        let main = table.grade(MaterialKind::Rebar, main_bar_grade)?;
        let stirrup = table.grade(MaterialKind::Rebar, stirrup_grade)?;

        Ok(MaterialProperties {
            section_material_type,
            concrete_grade_name: section.name.clone(),
            fc_mpa: section.strength_mpa,
            ec_mpa: section.modulus_mpa,
            main_bar_grade_name: main.name.clone(),
            fy_mpa: main.strength_mpa,
            es_mpa: main.modulus_mpa,
            stirrup_grade_name: stirrup.name.clone(),
            fys_mpa: stirrup.strength_mpa,
            stirrup_es_mpa: stirrup.modulus_mpa,
        })
    }

    /// Validate the strengths and moduli every calculation divides by.
    pub fn validate(&self) -> CalcResult<()> {
        require_positive("fc_mpa", self.fc_mpa)?;
        require_positive("ec_mpa", self.ec_mpa)?;
        require_positive("fy_mpa", self.fy_mpa)?;
        require_positive("es_mpa", self.es_mpa)?;
        require_positive("fys_mpa", self.fys_mpa)?;
        Ok(())
    }

    /// Modular ratio n = Es/Ec
    pub fn modular_ratio(&self) -> f64 {
        self.es_mpa / self.ec_mpa
    }

    /// Short description, e.g. "Concrete C30 / 500E bars / 300E stirrups"
    pub fn display_name(&self) -> String {
        format!(
            "{} {} / {} bars / {} stirrups",
            self.section_material_type,
            self.concrete_grade_name,
            self.main_bar_grade_name,
            self.stirrup_grade_name
        )
    }
}

impl Default for MaterialProperties {
    fn default() -> Self {
        MaterialProperties {
            section_material_type: SectionMaterialType::Concrete,
            concrete_grade_name: "C30".to_string(),
            fc_mpa: 30.0,
            ec_mpa: 25084.0,
            main_bar_grade_name: "500E".to_string(),
            fy_mpa: 500.0,
            es_mpa: 200_000.0,
            stirrup_grade_name: "300E".to_string(),
            fys_mpa: 300.0,
            stirrup_es_mpa: 200_000.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_lookup() {
        let c30 = GRADE_TABLE.grade(MaterialKind::Concrete, "C30").unwrap();
        assert_eq!(c30.strength_mpa, 30.0);
        assert_eq!(c30.modulus_mpa, 25084.0);

        let m12 = GRADE_TABLE.grade(MaterialKind::Masonry, "m12").unwrap();
        assert_eq!(m12.strength_mpa, 12.0);
    }

    #[test]
    fn test_unknown_grade() {
        let err = GRADE_TABLE.grade(MaterialKind::Rebar, "700X").unwrap_err();
        assert_eq!(err.error_code(), "MATERIAL_NOT_FOUND");
    }

    #[test]
    fn test_strains() {
        assert_eq!(GRADE_TABLE.concrete_strain(), 0.003);
        assert_eq!(GRADE_TABLE.rebar_strain(), 0.0025);
    }

    #[test]
    fn test_strain_fallback_when_kind_missing() {
        let table = MaterialGradeTable {
            material_properties: vec![],
        };
        assert_eq!(table.concrete_strain(), DEFAULT_CONCRETE_STRAIN);
        assert_eq!(table.rebar_strain(), DEFAULT_REBAR_STRAIN);
        assert!(table.grades(MaterialKind::Concrete).is_empty());
    }

    #[test]
    fn test_table_json_roundtrip() {
        let json = serde_json::to_string_pretty(&MaterialGradeTable::builtin()).unwrap();
        assert!(json.contains("\"type\": \"concrete\""));
        let parsed = MaterialGradeTable::from_json(&json).unwrap();
        assert_eq!(parsed, MaterialGradeTable::builtin());
    }

    #[test]
    fn test_table_rejects_non_positive_values() {
        let json = r#"{"material_properties":[{"type":"rebar","strain":0.0025,
            "grade":[{"name":"bad","strength_mpa":0.0,"modulus_mpa":200000.0}]}]}"#;
        assert!(MaterialGradeTable::from_json(json).is_err());
    }

    #[test]
    fn test_from_grades_masonry() {
        let props = MaterialProperties::from_grades(
            &GRADE_TABLE,
            SectionMaterialType::Masonry,
            "M15",
            "500E",
            "300E",
        )
        .unwrap();
        assert_eq!(props.section_material_type, SectionMaterialType::Masonry);
        assert_eq!(props.fc_mpa, 15.0);
        assert_eq!(props.ec_mpa, 12750.0);
    }

    #[test]
    fn test_from_grades_rejects_wrong_kind() {
        // C30 is a concrete grade, not masonry
        let result = MaterialProperties::from_grades(
            &GRADE_TABLE,
            SectionMaterialType::Masonry,
            "C30",
            "500E",
            "300E",
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_validate() {
        let mut props = MaterialProperties::default();
        assert!(props.validate().is_ok());
        props.fy_mpa = 0.0;
        assert!(props.validate().is_err());
    }

    #[test]
    fn test_modular_ratio_and_display() {
        let props = MaterialProperties::default();
        assert!((props.modular_ratio() - 200_000.0 / 25084.0).abs() < 1e-12);
        assert_eq!(props.display_name(), "Concrete C30 / 500E bars / 300E stirrups");
    }

    #[test]
    fn test_section_type_serialization() {
        let json = serde_json::to_string(&SectionMaterialType::Masonry).unwrap();
        assert_eq!(json, "\"masonry\"");
    }
}
