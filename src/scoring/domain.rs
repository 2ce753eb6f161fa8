use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier wrapper for scored indicators.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct IndicatorId(pub String);

impl fmt::Display for IndicatorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identifier wrapper for assessment modules.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ModuleId(pub String);

impl fmt::Display for ModuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Response categories, each carrying its own normalization rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IndicatorCategory {
    Cobertura,
    Frecuencia,
    Profundidad,
}

impl IndicatorCategory {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Cobertura => "Cobertura",
            Self::Frecuencia => "Frecuencia",
            Self::Profundidad => "Profundidad",
        }
    }
}

/// Raw answer payload; the shape is fixed by the indicator's category.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RawValue {
    Coverage(bool),
    Frequency {
        value: f64,
        #[serde(default)]
        unit: Option<FrequencyUnit>,
    },
    Depth(u8),
}

impl RawValue {
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Coverage(_) => "coverage",
            Self::Frequency { .. } => "frequency",
            Self::Depth(_) => "depth",
        }
    }
}

/// One raw answer submitted for an indicator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssessmentResponse {
    pub indicator: IndicatorId,
    pub category: IndicatorCategory,
    pub value: RawValue,
}

/// The seven capability axes of the transformation framework.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransformationArea {
    Personalizacion,
    Aprendizaje,
    Evaluacion,
    Proposito,
    Familias,
    TrabajoDocente,
    Liderazgo,
}

impl TransformationArea {
    pub const fn ordered() -> [Self; 7] {
        [
            Self::Personalizacion,
            Self::Aprendizaje,
            Self::Evaluacion,
            Self::Proposito,
            Self::Familias,
            Self::TrabajoDocente,
            Self::Liderazgo,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Personalizacion => "Personalización",
            Self::Aprendizaje => "Aprendizaje",
            Self::Evaluacion => "Evaluación",
            Self::Proposito => "Propósito",
            Self::Familias => "Familias",
            Self::TrabajoDocente => "Trabajo Docente",
            Self::Liderazgo => "Liderazgo",
        }
    }
}

/// School grade levels served by the network, preschool through senior year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GradeLevel {
    MedioMenor,
    MedioMayor,
    PreKinder,
    Kinder,
    #[serde(rename = "1_basico")]
    PrimeroBasico,
    #[serde(rename = "2_basico")]
    SegundoBasico,
    #[serde(rename = "3_basico")]
    TerceroBasico,
    #[serde(rename = "4_basico")]
    CuartoBasico,
    #[serde(rename = "5_basico")]
    QuintoBasico,
    #[serde(rename = "6_basico")]
    SextoBasico,
    #[serde(rename = "7_basico")]
    SeptimoBasico,
    #[serde(rename = "8_basico")]
    OctavoBasico,
    #[serde(rename = "1_medio")]
    PrimeroMedio,
    #[serde(rename = "2_medio")]
    SegundoMedio,
    #[serde(rename = "3_medio")]
    TerceroMedio,
    #[serde(rename = "4_medio")]
    CuartoMedio,
}

impl GradeLevel {
    pub const fn ordered() -> [Self; 16] {
        [
            Self::MedioMenor,
            Self::MedioMayor,
            Self::PreKinder,
            Self::Kinder,
            Self::PrimeroBasico,
            Self::SegundoBasico,
            Self::TerceroBasico,
            Self::CuartoBasico,
            Self::QuintoBasico,
            Self::SextoBasico,
            Self::SeptimoBasico,
            Self::OctavoBasico,
            Self::PrimeroMedio,
            Self::SegundoMedio,
            Self::TerceroMedio,
            Self::CuartoMedio,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::MedioMenor => "Medio Menor",
            Self::MedioMayor => "Medio Mayor",
            Self::PreKinder => "Pre-Kinder",
            Self::Kinder => "Kinder",
            Self::PrimeroBasico => "1° Básico",
            Self::SegundoBasico => "2° Básico",
            Self::TerceroBasico => "3° Básico",
            Self::CuartoBasico => "4° Básico",
            Self::QuintoBasico => "5° Básico",
            Self::SextoBasico => "6° Básico",
            Self::SeptimoBasico => "7° Básico",
            Self::OctavoBasico => "8° Básico",
            Self::PrimeroMedio => "1° Medio",
            Self::SegundoMedio => "2° Medio",
            Self::TerceroMedio => "3° Medio",
            Self::CuartoMedio => "4° Medio",
        }
    }

    pub const fn cycle(self) -> GradeCycle {
        match self {
            Self::MedioMenor | Self::MedioMayor | Self::PreKinder | Self::Kinder => {
                GradeCycle::Preescolar
            }
            Self::PrimeroBasico
            | Self::SegundoBasico
            | Self::TerceroBasico
            | Self::CuartoBasico
            | Self::QuintoBasico
            | Self::SextoBasico
            | Self::SeptimoBasico
            | Self::OctavoBasico => GradeCycle::Basica,
            Self::PrimeroMedio | Self::SegundoMedio | Self::TerceroMedio | Self::CuartoMedio => {
                GradeCycle::Media
            }
        }
    }
}

/// Cycle grouping used when expectations differ by school stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GradeCycle {
    Preescolar,
    Basica,
    Media,
}

impl GradeCycle {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Preescolar => "Preescolar",
            Self::Basica => "Básica",
            Self::Media => "Media",
        }
    }
}

/// Year of the school's transformation program, 1 through 5.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum TransformationYear {
    Year1,
    Year2,
    Year3,
    Year4,
    Year5,
}

impl TransformationYear {
    pub const fn ordered() -> [Self; 5] {
        [
            Self::Year1,
            Self::Year2,
            Self::Year3,
            Self::Year4,
            Self::Year5,
        ]
    }

    pub const fn number(self) -> u8 {
        self as u8 + 1
    }
}

impl From<TransformationYear> for u8 {
    fn from(year: TransformationYear) -> Self {
        year.number()
    }
}

impl TryFrom<u8> for TransformationYear {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Self::Year1),
            2 => Ok(Self::Year2),
            3 => Ok(Self::Year3),
            4 => Ok(Self::Year4),
            5 => Ok(Self::Year5),
            other => Err(format!("transformation year out of range: {other}")),
        }
    }
}

/// Discrete 0-4 maturity scale behind every 0-100 score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum MaturityLevel {
    Starting,
    Emerging,
    Developing,
    Advanced,
    Consolidated,
}

impl MaturityLevel {
    pub const fn ordered() -> [Self; 5] {
        [
            Self::Starting,
            Self::Emerging,
            Self::Developing,
            Self::Advanced,
            Self::Consolidated,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Starting => "Por Comenzar",
            Self::Emerging => "Incipiente",
            Self::Developing => "En Desarrollo",
            Self::Advanced => "Avanzado",
            Self::Consolidated => "Consolidado",
        }
    }

    pub const fn index(self) -> u8 {
        self as u8
    }

    pub const fn from_index(index: u8) -> Option<Self> {
        match index {
            0 => Some(Self::Starting),
            1 => Some(Self::Emerging),
            2 => Some(Self::Developing),
            3 => Some(Self::Advanced),
            4 => Some(Self::Consolidated),
            _ => None,
        }
    }

    /// Quarter-step discretization of a 0-100 score, clamped to the scale.
    pub fn from_score(score: f64) -> Self {
        let level = (score / 25.0).floor();
        if level <= 0.0 {
            Self::Starting
        } else if level >= 4.0 {
            Self::Consolidated
        } else if level >= 3.0 {
            Self::Advanced
        } else if level >= 2.0 {
            Self::Developing
        } else {
            Self::Emerging
        }
    }
}

impl From<MaturityLevel> for u8 {
    fn from(level: MaturityLevel) -> Self {
        level.index()
    }
}

impl TryFrom<u8> for MaturityLevel {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::from_index(value).ok_or_else(|| format!("maturity level out of range: {value}"))
    }
}

/// Units a frequency answer or expectation can be expressed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FrequencyUnit {
    Dia,
    Semana,
    Mes,
    Trimestre,
    Semestre,
    #[serde(rename = "año")]
    Anio,
}

impl FrequencyUnit {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Dia => "día",
            Self::Semana => "semana",
            Self::Mes => "mes",
            Self::Trimestre => "trimestre",
            Self::Semestre => "semestre",
            Self::Anio => "año",
        }
    }

    /// Occurrences per year represented by one count in this cadence.
    pub const fn annual_factor(self) -> f64 {
        match self {
            Self::Dia => 365.0,
            Self::Semana => 52.0,
            Self::Mes => 12.0,
            Self::Trimestre => 4.0,
            Self::Semestre => 2.0,
            Self::Anio => 1.0,
        }
    }

    pub fn annualize(self, value: f64) -> f64 {
        value * self.annual_factor()
    }
}
