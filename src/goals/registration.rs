use serde::{Deserialize, Serialize};

pub const ESLINT_AUTOFIX: &str = "eslint-autofix";
pub const TSLINT_AUTOFIX: &str = "tslint-autofix";
pub const ESLINT_INSPECTION: &str = "eslint-inspection";
pub const TSLINT_INSPECTION: &str = "tslint-inspection";
pub const NPM_AUDIT_INSPECTION: &str = "npm-audit";

/// A fix applied to the code before other goals run
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AutofixRegistration {
    pub name: String,
    pub command: String,
}

impl AutofixRegistration {
    pub fn eslint() -> Self {
        Self {
            name: ESLINT_AUTOFIX.to_string(),
            command: "eslint --fix .".to_string(),
        }
    }

    pub fn tslint() -> Self {
        Self {
            name: TSLINT_AUTOFIX.to_string(),
            command: "tslint --fix --project .".to_string(),
        }
    }
}

/// A read-only review of the code that reports findings
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct InspectionRegistration {
    pub name: String,
    pub command: String,
}

impl InspectionRegistration {
    pub fn eslint() -> Self {
        Self {
            name: ESLINT_INSPECTION.to_string(),
            command: "eslint --format json .".to_string(),
        }
    }

    pub fn tslint() -> Self {
        Self {
            name: TSLINT_INSPECTION.to_string(),
            command: "tslint --format json --project .".to_string(),
        }
    }

    pub fn npm_audit() -> Self {
        Self {
            name: NPM_AUDIT_INSPECTION.to_string(),
            command: "npm audit --json".to_string(),
        }
    }
}
