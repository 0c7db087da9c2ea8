//! Tool catalog - the authoritative mapping from tool names to phases.
//!
//! Every tool the model may ever call is registered here once, at startup,
//! together with its owning phase and terminal flag. All other components
//! (the phase gate, the termination policy, the session loop) consult the
//! catalog instead of matching on tool-name strings, so presentation-side
//! and orchestration-side classification cannot drift apart.

mod descriptor;
mod error;
mod registry;

pub use descriptor::ToolDescriptor;
pub use error::CatalogError;
pub use registry::ToolCatalog;

/// Canonical tool names of the built-in answer pipeline.
pub mod names {
    /// Read the raw YAML definition of a semantic entity.
    pub const READ_ENTITY_YAML_RAW: &str = "ReadEntityYamlRaw";
    /// Load several semantic entities in one call.
    pub const LOAD_ENTITIES_BULK: &str = "LoadEntitiesBulk";
    /// Scan the properties of a semantic entity.
    pub const SCAN_ENTITY_PROPERTIES: &str = "ScanEntityProperties";
    /// Assess how well an entity covers the question.
    pub const ASSESS_ENTITY_COVERAGE: &str = "AssessEntityCoverage";
    /// Search the semantic catalog.
    pub const SEARCH_CATALOG: &str = "SearchCatalog";
    /// Search the warehouse schema.
    pub const SEARCH_SCHEMA: &str = "SearchSchema";
    /// Ask the user a clarifying question and end the run.
    pub const CLARIFY_INTENT: &str = "ClarifyIntent";
    /// Commit to a query plan and move on to building.
    pub const FINALIZE_PLAN: &str = "FinalizePlan";
    /// Declare that the catalog cannot answer the question and end the run.
    pub const FINALIZE_NO_DATA: &str = "FinalizeNoData";
    /// Draft the SQL query.
    pub const BUILD_SQL: &str = "BuildSQL";
    /// Validate the drafted SQL.
    pub const VALIDATE_SQL: &str = "ValidateSQL";
    /// Commit to the built query and move on to execution.
    pub const FINALIZE_BUILD: &str = "FinalizeBuild";
    /// Estimate the cost of the query before running it.
    pub const ESTIMATE_COST: &str = "EstimateCost";
    /// Execute the query, repairing it on failure.
    pub const EXECUTE_SQL_WITH_REPAIR: &str = "ExecuteSQLWithRepair";
    /// Quick QA over the result rows.
    pub const SANITY_CHECK: &str = "SanityCheck";
    /// Convert result rows into CSV plus a preview.
    pub const FORMAT_RESULTS: &str = "FormatResults";
    /// Record the business narrative and confidence.
    pub const EXPLAIN_RESULTS: &str = "ExplainResults";
    /// Finalize the report payload and end the run.
    pub const FINALIZE_REPORT: &str = "FinalizeReport";
    /// Generate a bar chart.
    pub const GENERATE_BAR_CHART: &str = "generateBarChart";
    /// Generate a line chart.
    pub const GENERATE_LINE_CHART: &str = "generateLineChart";
    /// Generate a pie chart.
    pub const GENERATE_PIE_CHART: &str = "generatePieChart";
    /// Generate a scatter plot.
    pub const GENERATE_SCATTER_PLOT: &str = "generateScatterPlot";
    /// Pick and configure a chart automatically.
    pub const AUTO_SELECT_VISUALIZATION: &str = "autoSelectVisualization";
}
