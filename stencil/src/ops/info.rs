//! Info operation - template details.

use stencil_catalog::{Template, VariableType};

use crate::reports::{InfoReport, VariableInfo};

/// Collect what a user needs to know before rendering a template.
pub fn info(template: &Template) -> InfoReport {
    let variables = template
        .variables
        .iter()
        .map(|v| VariableInfo {
            name: v.name.clone(),
            label: v.label.clone(),
            ty: v.ty.to_string(),
            default: match v.ty {
                VariableType::Text => format!("{:?}", v.default_value.to_string()),
                VariableType::Select | VariableType::Boolean => v.default_value.to_string(),
            },
            options: v.options.clone(),
            description: v.description.clone(),
        })
        .collect();

    InfoReport {
        id: template.id.clone(),
        name: template.name.clone(),
        description: template.description.clone(),
        category: template.category.clone(),
        file_name: template.file_name.clone(),
        dependencies: template.dependencies.clone(),
        variables,
        examples: template.example_names(),
    }
}

#[cfg(test)]
mod tests {
    use stencil_catalog::VariableDef;

    use super::*;

    #[test]
    fn test_info_defaults() {
        let template = Template::new("t", "")
            .with_variable(VariableDef::text("entityName", "Merchant"))
            .with_variable(VariableDef::select("client", ["axios", "fetch"], "fetch"))
            .with_variable(VariableDef::boolean("withTests", true));

        let report = info(&template);
        let defaults: Vec<&str> = report.variables.iter().map(|v| v.default.as_str()).collect();
        assert_eq!(defaults, ["\"Merchant\"", "fetch", "true"]);
        assert_eq!(report.variables[1].options, ["axios", "fetch"]);
    }
}
