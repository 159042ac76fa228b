//! Scoring rubric: schema, JSON persistence, and score arithmetic
//!
//! An evaluation lives as `evaluation.json` inside the repository it
//! grades. Loading distinguishes a missing file, malformed JSON, and a
//! schema violation (score out of range), each with its own error.

use std::fs;
use std::path::{Path, PathBuf};

use log::info;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// File name of the persisted evaluation, relative to the repo root.
pub const EVALUATION_FILENAME: &str = "evaluation.json";

#[derive(Debug, Error)]
pub enum RubricError {
    #[error("evaluation file does not exist: {0}")]
    Missing(PathBuf),
    #[error("evaluation file is malformed: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("evaluation is invalid: {criterion} is {score}, maximum is {max}")]
    Invalid {
        criterion: &'static str,
        score: u32,
        max: u32,
    },
    #[error("failed to read or write evaluation file: {0}")]
    Io(#[from] std::io::Error),
}

/// One scored criterion with an optional free-form comment.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Criterion {
    pub score: u32,
    #[serde(default)]
    pub comment: String,
}

fn check(criterion: &'static str, value: &Criterion, max: u32) -> Result<(), RubricError> {
    if value.score > max {
        return Err(RubricError::Invalid {
            criterion,
            score: value.score,
            max,
        });
    }
    Ok(())
}

/// Structure, readability, and coding practices. Max 40.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StructureSection {
    pub modular_architecture: Criterion,
    pub code_readability: Criterion,
    pub refactoring: Criterion,
    pub unit_tests: Criterion,
    pub environment_setup: Criterion,
}

impl StructureSection {
    pub const MAX: u32 = 40;

    fn validate(&self) -> Result<(), RubricError> {
        check("structure.modular_architecture", &self.modular_architecture, 10)?;
        check("structure.code_readability", &self.code_readability, 5)?;
        check("structure.refactoring", &self.refactoring, 5)?;
        check("structure.unit_tests", &self.unit_tests, 10)?;
        check("structure.environment_setup", &self.environment_setup, 10)
    }

    fn total(&self) -> u32 {
        self.modular_architecture.score
            + self.code_readability.score
            + self.refactoring.score
            + self.unit_tests.score
            + self.environment_setup.score
    }
}

/// Git usage and work distribution. Max 25.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollaborationSection {
    pub git_usage: Criterion,
    pub task_distribution: Criterion,
}

impl CollaborationSection {
    pub const MAX: u32 = 25;

    fn validate(&self) -> Result<(), RubricError> {
        check("collaboration.git_usage", &self.git_usage, 10)?;
        check("collaboration.task_distribution", &self.task_distribution, 15)
    }

    fn total(&self) -> u32 {
        self.git_usage.score + self.task_distribution.score
    }
}

/// Documentation quality and deliverable hygiene. Max 35.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentationSection {
    pub readme: Criterion,
    pub code_comments: Criterion,
    pub usage_guide: Criterion,
    pub clean_deliverables: Criterion,
    pub prompt_engineering: Criterion,
}

impl DocumentationSection {
    pub const MAX: u32 = 35;

    fn validate(&self) -> Result<(), RubricError> {
        check("documentation.readme", &self.readme, 10)?;
        check("documentation.code_comments", &self.code_comments, 5)?;
        check("documentation.usage_guide", &self.usage_guide, 5)?;
        check("documentation.clean_deliverables", &self.clean_deliverables, 5)?;
        check("documentation.prompt_engineering", &self.prompt_engineering, 10)
    }

    fn total(&self) -> u32 {
        self.readme.score
            + self.code_comments.score
            + self.usage_guide.score
            + self.clean_deliverables.score
            + self.prompt_engineering.score
    }
}

/// Bonus criteria for ML depth, one point each. Max 5.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MlBonusSection {
    pub model_choice: Criterion,
    pub preprocessing: Criterion,
    pub model_evaluation: Criterion,
    pub critical_analysis: Criterion,
    pub explainability: Criterion,
}

impl MlBonusSection {
    pub const MAX: u32 = 5;

    fn validate(&self) -> Result<(), RubricError> {
        check("bonus_ml.model_choice", &self.model_choice, 1)?;
        check("bonus_ml.preprocessing", &self.preprocessing, 1)?;
        check("bonus_ml.model_evaluation", &self.model_evaluation, 1)?;
        check("bonus_ml.critical_analysis", &self.critical_analysis, 1)?;
        check("bonus_ml.explainability", &self.explainability, 1)
    }

    fn total(&self) -> u32 {
        self.model_choice.score
            + self.preprocessing.score
            + self.model_evaluation.score
            + self.critical_analysis.score
            + self.explainability.score
    }
}

/// Bonus criteria for advanced technical work, one point each. Max 5.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TechBonusSection {
    pub ml_pipeline: Criterion,
    pub integrated_explainability: Criterion,
    pub working_interface: Criterion,
    pub complexity: Criterion,
    pub lean_dependencies: Criterion,
}

impl TechBonusSection {
    pub const MAX: u32 = 5;

    fn validate(&self) -> Result<(), RubricError> {
        check("bonus_tech.ml_pipeline", &self.ml_pipeline, 1)?;
        check(
            "bonus_tech.integrated_explainability",
            &self.integrated_explainability,
            1,
        )?;
        check("bonus_tech.working_interface", &self.working_interface, 1)?;
        check("bonus_tech.complexity", &self.complexity, 1)?;
        check("bonus_tech.lean_dependencies", &self.lean_dependencies, 1)
    }

    fn total(&self) -> u32 {
        self.ml_pipeline.score
            + self.integrated_explainability.score
            + self.working_interface.score
            + self.complexity.score
            + self.lean_dependencies.score
    }
}

/// A complete project evaluation. `Default` gives all-zero scores.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Evaluation {
    pub structure: StructureSection,
    pub collaboration: CollaborationSection,
    pub documentation: DocumentationSection,
    pub bonus_ml: MlBonusSection,
    pub bonus_tech: TechBonusSection,
}

impl Evaluation {
    /// Enforce every per-criterion maximum.
    pub fn validate(&self) -> Result<(), RubricError> {
        self.structure.validate()?;
        self.collaboration.validate()?;
        self.documentation.validate()?;
        self.bonus_ml.validate()?;
        self.bonus_tech.validate()
    }
}

/// Computed score breakdown. Fixed-weight sums over the sections.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scores {
    pub structure_score: u32,
    pub structure_max: u32,
    pub collaboration_score: u32,
    pub collaboration_max: u32,
    pub documentation_score: u32,
    pub documentation_max: u32,
    pub main_score: u32,
    pub main_max: u32,
    pub bonus_ml_score: u32,
    pub bonus_ml_max: u32,
    pub bonus_tech_score: u32,
    pub bonus_tech_max: u32,
    pub total_bonus: u32,
    pub total_bonus_max: u32,
    pub final_score: u32,
    pub final_max: u32,
    pub percentage: f64,
}

impl Scores {
    pub fn from_evaluation(evaluation: &Evaluation) -> Self {
        let structure_score = evaluation.structure.total();
        let collaboration_score = evaluation.collaboration.total();
        let documentation_score = evaluation.documentation.total();
        let main_score = structure_score + collaboration_score + documentation_score;
        let bonus_ml_score = evaluation.bonus_ml.total();
        let bonus_tech_score = evaluation.bonus_tech.total();
        let total_bonus = bonus_ml_score + bonus_tech_score;
        let main_max = StructureSection::MAX + CollaborationSection::MAX + DocumentationSection::MAX;
        let total_bonus_max = MlBonusSection::MAX + TechBonusSection::MAX;

        Self {
            structure_score,
            structure_max: StructureSection::MAX,
            collaboration_score,
            collaboration_max: CollaborationSection::MAX,
            documentation_score,
            documentation_max: DocumentationSection::MAX,
            main_score,
            main_max,
            bonus_ml_score,
            bonus_ml_max: MlBonusSection::MAX,
            bonus_tech_score,
            bonus_tech_max: TechBonusSection::MAX,
            total_bonus,
            total_bonus_max,
            final_score: main_score + total_bonus,
            final_max: main_max + total_bonus_max,
            percentage: (main_score as f64 / main_max as f64 * 1000.0).round() / 10.0,
        }
    }

    /// Markdown breakdown of the computed totals.
    pub fn summary(&self) -> String {
        format!(
            "## Evaluation Summary\n\
             \n\
             **Main Score:** {}/{} ({}%)\n\
             **Bonus Score:** {}/{}\n\
             **Final Score:** {}/{}\n\
             \n\
             ### Breakdown:\n\
             - **Structure & Design:** {}/{}\n\
             - **Collaboration:** {}/{}\n\
             - **Documentation:** {}/{}\n\
             - **ML Bonus:** {}/{}\n\
             - **Technical Bonus:** {}/{}",
            self.main_score,
            self.main_max,
            self.percentage,
            self.total_bonus,
            self.total_bonus_max,
            self.final_score,
            self.final_max,
            self.structure_score,
            self.structure_max,
            self.collaboration_score,
            self.collaboration_max,
            self.documentation_score,
            self.documentation_max,
            self.bonus_ml_score,
            self.bonus_ml_max,
            self.bonus_tech_score,
            self.bonus_tech_max,
        )
    }
}

/// Loads and persists the evaluation file for one repository.
pub struct Evaluator {
    file_path: PathBuf,
}

impl Evaluator {
    pub fn new(repo_path: &Path) -> Self {
        Self {
            file_path: repo_path.join(EVALUATION_FILENAME),
        }
    }

    pub fn file_path(&self) -> &Path {
        &self.file_path
    }

    /// Load and validate the stored evaluation.
    pub fn load(&self) -> Result<Evaluation, RubricError> {
        if !self.file_path.exists() {
            return Err(RubricError::Missing(self.file_path.clone()));
        }
        let data = fs::read_to_string(&self.file_path)?;
        let evaluation: Evaluation = serde_json::from_str(&data)?;
        evaluation.validate()?;
        Ok(evaluation)
    }

    /// Validate and persist an evaluation as pretty-printed JSON.
    pub fn save(&self, evaluation: &Evaluation) -> Result<(), RubricError> {
        evaluation.validate()?;
        let json = serde_json::to_string_pretty(evaluation)?;
        fs::write(&self.file_path, json)?;
        info!("saved evaluation to {}", self.file_path.display());
        Ok(())
    }
}
