//! Registry holding every tool descriptor, keyed by name.

use crate::catalog::{names, CatalogError, ToolDescriptor};
use crate::phase::Phase;
use serde_json::json;
use std::collections::HashMap;

/// The single source of truth for which tools exist and when they may run.
///
/// Descriptors are registered once at startup and never mutated afterwards.
/// Registration order is preserved so phase directives enumerate tools in a
/// stable order.
///
/// # Example
///
/// ```
/// use askdb::catalog::{names, ToolCatalog};
/// use askdb::phase::Phase;
///
/// let catalog = ToolCatalog::pipeline();
///
/// assert!(catalog.contains(names::FINALIZE_PLAN));
/// assert_eq!(catalog.phase_of(names::BUILD_SQL).unwrap(), Phase::Building);
/// assert!(catalog.is_terminal(names::FINALIZE_REPORT).unwrap());
/// ```
#[derive(Debug, Default, Clone)]
pub struct ToolCatalog {
    tools: Vec<ToolDescriptor>,
    index: HashMap<String, usize>,
}

impl ToolCatalog {
    /// Create a new empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a tool descriptor.
    ///
    /// Returns an error if a tool with the same name already exists.
    pub fn register(&mut self, descriptor: ToolDescriptor) -> Result<(), CatalogError> {
        if self.index.contains_key(&descriptor.name) {
            return Err(CatalogError::duplicate_name(&descriptor.name));
        }
        self.index.insert(descriptor.name.clone(), self.tools.len());
        self.tools.push(descriptor);
        Ok(())
    }

    /// Get a tool by name.
    pub fn get(&self, name: &str) -> Option<&ToolDescriptor> {
        self.index.get(name).map(|&i| &self.tools[i])
    }

    /// Check if a tool exists.
    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Look a tool up, failing with `UnknownTool` if it is absent.
    pub fn ensure_known(&self, name: &str) -> Result<&ToolDescriptor, CatalogError> {
        self.get(name).ok_or_else(|| CatalogError::unknown_tool(name))
    }

    /// All tools callable during the given phase, in registration order.
    pub fn tools_for_phase(&self, phase: Phase) -> Vec<&ToolDescriptor> {
        self.tools.iter().filter(|d| d.phase == phase).collect()
    }

    /// Whether the named tool ends the session on success.
    pub fn is_terminal(&self, name: &str) -> Result<bool, CatalogError> {
        self.ensure_known(name).map(|d| d.terminal)
    }

    /// The phase owning the named tool.
    pub fn phase_of(&self, name: &str) -> Result<Phase, CatalogError> {
        self.ensure_known(name).map(|d| d.phase)
    }

    /// Number of registered tools.
    pub fn len(&self) -> usize {
        self.tools.len()
    }

    /// Check if the catalog is empty.
    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    /// All registered tool names, in registration order.
    pub fn tool_names(&self) -> Vec<&str> {
        self.tools.iter().map(|d| d.name.as_str()).collect()
    }

    /// Build the catalog of the built-in answer pipeline.
    ///
    /// Planning owns the semantic-catalog discovery tools plus the three
    /// terminal-capable tools; Building owns SQL construction and
    /// validation; Execution owns cost estimation and execute-with-repair;
    /// Reporting owns result shaping, narrative and chart tools.
    pub fn pipeline() -> Self {
        let mut catalog = Self::new();

        let entity_param = json!({
            "type": "object",
            "properties": {
                "entity": { "type": "string", "description": "Entity name" }
            },
            "required": ["entity"]
        });

        let descriptors = vec![
            // Planning
            ToolDescriptor::new(
                names::READ_ENTITY_YAML_RAW,
                "Read the raw YAML definition of a semantic entity",
                json!({
                    "type": "object",
                    "properties": {
                        "name": { "type": "string", "description": "Entity name" }
                    },
                    "required": ["name"]
                }),
                Phase::Planning,
            ),
            ToolDescriptor::new(
                names::LOAD_ENTITIES_BULK,
                "Load several semantic entities in one call",
                json!({
                    "type": "object",
                    "properties": {
                        "names": { "type": "array", "items": { "type": "string" } }
                    },
                    "required": ["names"]
                }),
                Phase::Planning,
            ),
            ToolDescriptor::new(
                names::SCAN_ENTITY_PROPERTIES,
                "Scan the properties of a semantic entity",
                entity_param.clone(),
                Phase::Planning,
            ),
            ToolDescriptor::new(
                names::ASSESS_ENTITY_COVERAGE,
                "Assess how well an entity covers the question",
                entity_param,
                Phase::Planning,
            ),
            ToolDescriptor::new(
                names::SEARCH_CATALOG,
                "Search the semantic catalog",
                json!({
                    "type": "object",
                    "properties": {
                        "query": { "type": "string" }
                    },
                    "required": ["query"]
                }),
                Phase::Planning,
            ),
            ToolDescriptor::new(
                names::SEARCH_SCHEMA,
                "Search the warehouse schema",
                json!({
                    "type": "object",
                    "properties": {
                        "keyword": { "type": "string" }
                    },
                    "required": ["keyword"]
                }),
                Phase::Planning,
            ),
            ToolDescriptor::new(
                names::CLARIFY_INTENT,
                "Ask the user one clarifying question when the request is ambiguous",
                json!({
                    "type": "object",
                    "properties": {
                        "question": { "type": "string" }
                    },
                    "required": ["question"]
                }),
                Phase::Planning,
            )
            .with_terminal(),
            ToolDescriptor::new(
                names::FINALIZE_PLAN,
                "Commit to a query plan and hand over to SQL building",
                json!({
                    "type": "object",
                    "properties": {
                        "plan": { "type": "string", "description": "The committed plan" }
                    },
                    "required": ["plan"]
                }),
                Phase::Planning,
            ),
            ToolDescriptor::new(
                names::FINALIZE_NO_DATA,
                "Declare that the catalog cannot answer the question",
                json!({
                    "type": "object",
                    "properties": {
                        "message": { "type": "string" }
                    },
                    "required": ["message"]
                }),
                Phase::Planning,
            )
            .with_terminal(),
            // Building
            ToolDescriptor::new(
                names::BUILD_SQL,
                "Draft SQL for the committed plan",
                json!({
                    "type": "object",
                    "properties": {
                        "plan": { "type": "string" }
                    },
                    "required": ["plan"]
                }),
                Phase::Building,
            ),
            ToolDescriptor::new(
                names::VALIDATE_SQL,
                "Validate the drafted SQL against the schema",
                json!({
                    "type": "object",
                    "properties": {
                        "sql": { "type": "string" }
                    },
                    "required": ["sql"]
                }),
                Phase::Building,
            ),
            ToolDescriptor::new(
                names::FINALIZE_BUILD,
                "Commit to the built query and hand over to execution",
                json!({
                    "type": "object",
                    "properties": {
                        "sql": { "type": "string" }
                    },
                    "required": ["sql"]
                }),
                Phase::Building,
            ),
            // Execution
            ToolDescriptor::new(
                names::ESTIMATE_COST,
                "Estimate the cost of the query before running it",
                json!({
                    "type": "object",
                    "properties": {
                        "sql": { "type": "string" }
                    },
                    "required": ["sql"]
                }),
                Phase::Execution,
            ),
            ToolDescriptor::new(
                names::EXECUTE_SQL_WITH_REPAIR,
                "Execute the query, repairing and retrying it on failure",
                json!({
                    "type": "object",
                    "properties": {
                        "sql": { "type": "string" }
                    },
                    "required": ["sql"]
                }),
                Phase::Execution,
            ),
            // Reporting
            ToolDescriptor::new(
                names::SANITY_CHECK,
                "Quick QA over result rows and columns; flags simple anomalies",
                rows_columns_params(),
                Phase::Reporting,
            ),
            ToolDescriptor::new(
                names::FORMAT_RESULTS,
                "Convert rows and columns into Base64 CSV plus a small preview",
                rows_columns_params(),
                Phase::Reporting,
            ),
            ToolDescriptor::new(
                names::EXPLAIN_RESULTS,
                "Record the business-facing narrative and a calibrated confidence score",
                json!({
                    "type": "object",
                    "properties": {
                        "narrative": { "type": "string" },
                        "confidence": { "type": "number", "minimum": 0, "maximum": 1 }
                    },
                    "required": ["narrative", "confidence"]
                }),
                Phase::Reporting,
            ),
            ToolDescriptor::new(
                names::FINALIZE_REPORT,
                "Finalize the report payload for the UI",
                json!({
                    "type": "object",
                    "properties": {
                        "sql": { "type": "string" },
                        "csvBase64": { "type": "string" },
                        "preview": { "type": "array" },
                        "vegaLite": {},
                        "narrative": { "type": "string" },
                        "confidence": { "type": "number", "minimum": 0, "maximum": 1 }
                    },
                    "required": ["sql", "csvBase64", "preview", "narrative", "confidence"]
                }),
                Phase::Reporting,
            )
            .with_terminal(),
            ToolDescriptor::new(
                names::GENERATE_BAR_CHART,
                "Generate a bar chart comparing values across discrete categories",
                chart_params("bar"),
                Phase::Reporting,
            ),
            ToolDescriptor::new(
                names::GENERATE_LINE_CHART,
                "Generate a line chart highlighting trends over continuous dimensions",
                chart_params("line"),
                Phase::Reporting,
            ),
            ToolDescriptor::new(
                names::GENERATE_PIE_CHART,
                "Generate a pie chart showing proportional contributions to a whole",
                chart_params("pie"),
                Phase::Reporting,
            ),
            ToolDescriptor::new(
                names::GENERATE_SCATTER_PLOT,
                "Generate a scatter plot inspecting correlation across two variables",
                chart_params("scatter"),
                Phase::Reporting,
            ),
            ToolDescriptor::new(
                names::AUTO_SELECT_VISUALIZATION,
                "Automatically select and configure a chart for the data and goal",
                json!({
                    "type": "object",
                    "properties": {
                        "data": { "type": "array" },
                        "goal": { "type": "string" },
                        "title": { "type": "string" },
                        "description": { "type": "string" },
                        "config": { "type": "object" }
                    },
                    "required": ["data", "goal", "title"]
                }),
                Phase::Reporting,
            ),
        ];

        for descriptor in descriptors {
            // Names above are distinct by construction.
            let _ = catalog.register(descriptor);
        }

        catalog
    }
}

fn rows_columns_params() -> serde_json::Value {
    json!({
        "type": "object",
        "properties": {
            "rows": { "type": "array" },
            "columns": {
                "type": "array",
                "items": {
                    "type": "object",
                    "properties": {
                        "name": { "type": "string" },
                        "type": { "type": "string" }
                    },
                    "required": ["name", "type"]
                }
            }
        },
        "required": ["rows", "columns"]
    })
}

fn chart_params(kind: &str) -> serde_json::Value {
    json!({
        "type": "object",
        "properties": {
            "type": { "type": "string", "enum": [kind] },
            "title": { "type": "string" },
            "description": { "type": "string" },
            "data": { "type": "array" },
            "config": { "type": "object" }
        },
        "required": ["type", "title", "data"]
    })
}
