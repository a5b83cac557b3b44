//! Default values for archgraph configuration.
//!
//! All hardcoded names are centralized here. The defaults target the cap4k
//! DDD framework on Spring; every one of them can be overridden in
//! `archgraph.toml`.

// ============================================================================
// Output Defaults
// ============================================================================

/// Fallback module root when no source file reveals one.
pub const DEFAULT_OUTPUT_DIR: &str = ".";

/// Directory created under `<module>/build/` for the graph files.
pub const DEFAULT_OUTPUT_SUBDIR: &str = "archgraph";

/// Files whose presence marks a module root.
pub const DEFAULT_BUILD_MARKERS: &[&str] = &["build.gradle.kts", "build.gradle"];

/// Name of the node file.
pub const NODES_FILE: &str = "nodes.json";

/// Name of the relationship file.
pub const RELS_FILE: &str = "rels.json";

/// Project-local config file name.
pub const DEFAULT_CONFIG_FILE: &str = "archgraph.toml";

// ============================================================================
// Metadata Tags
// ============================================================================

pub const DEFAULT_AGGREGATE_ANNOTATION: &str =
    "com.only4.cap4k.ddd.core.domain.aggregate.annotation.Aggregate";
pub const DEFAULT_DOMAIN_EVENT_ANNOTATION: &str =
    "com.only4.cap4k.ddd.core.domain.event.annotation.DomainEvent";
pub const DEFAULT_INTEGRATION_EVENT_ANNOTATION: &str =
    "com.only4.cap4k.ddd.core.application.event.annotation.IntegrationEvent";
pub const DEFAULT_EVENT_LISTENER_ANNOTATION: &str =
    "org.springframework.context.event.EventListener";
pub const DEFAULT_CONTROLLER_ANNOTATION: &str =
    "org.springframework.web.bind.annotation.RestController";

/// Routing tags that turn a controller method into an API entry point.
pub const DEFAULT_ROUTE_ANNOTATIONS: &[&str] = &[
    "org.springframework.web.bind.annotation.RequestMapping",
    "org.springframework.web.bind.annotation.GetMapping",
    "org.springframework.web.bind.annotation.PostMapping",
    "org.springframework.web.bind.annotation.PutMapping",
    "org.springframework.web.bind.annotation.DeleteMapping",
    "org.springframework.web.bind.annotation.PatchMapping",
];

// ============================================================================
// Capabilities
// ============================================================================

pub const DEFAULT_REQUEST_SUPERVISOR: &str = "com.only4.cap4k.ddd.core.application.RequestSupervisor";
pub const DEFAULT_UNIT_OF_WORK: &str = "com.only4.cap4k.ddd.core.application.UnitOfWork";
pub const DEFAULT_REPOSITORY_SUPERVISOR: &str =
    "com.only4.cap4k.ddd.core.domain.repo.RepositorySupervisor";
pub const DEFAULT_AGGREGATE_FACTORY_SUPERVISOR: &str =
    "com.only4.cap4k.ddd.core.domain.aggregate.AggregateFactorySupervisor";
pub const DEFAULT_REQUEST_PARAM: &str = "com.only4.cap4k.ddd.core.application.RequestParam";
pub const DEFAULT_COMMAND_HANDLER: &str = "com.only4.cap4k.ddd.core.application.command.Command";
pub const DEFAULT_QUERY_HANDLER: &str = "com.only4.cap4k.ddd.core.application.query.Query";
pub const DEFAULT_REQUEST_HANDLER: &str = "com.only4.cap4k.ddd.core.application.RequestHandler";
pub const DEFAULT_PREDICATE: &str = "com.only4.cap4k.ddd.core.domain.repo.Predicate";
pub const DEFAULT_AGGREGATE_PREDICATE: &str =
    "com.only4.cap4k.ddd.core.domain.aggregate.AggregatePredicate";

pub const DEFAULT_CONSTRAINT_VALIDATORS: &[&str] = &[
    "jakarta.validation.ConstraintValidator",
    "javax.validation.ConstraintValidator",
];

// ============================================================================
// Recognised Method Names
// ============================================================================

pub const DEFAULT_DISPATCH_METHODS: &[&str] = &["send"];
pub const DEFAULT_CREATE_METHODS: &[&str] = &["create"];
pub const DEFAULT_SAVE_METHODS: &[&str] = &["save", SAVE_DEFAULT_METHOD];
pub const DEFAULT_REMOVE_METHODS: &[&str] = &["remove"];
pub const DEFAULT_LOOKUP_METHODS: &[&str] = &["findOne", "get", "findById", "find"];

/// Synthetic name of `save` called with its default argument. The unit of
/// work is passed as the first argument instead of the receiver.
pub const SAVE_DEFAULT_METHOD: &str = "save$default";

// ============================================================================
// Lifecycle Defaults
// ============================================================================

pub const DEFAULT_ON_CREATE: &str = "onCreate";
pub const DEFAULT_ON_CREATE_FALLBACK: &str = "onCreate";
pub const DEFAULT_ON_REMOVE: &str = "onDelete";
pub const DEFAULT_ON_REMOVE_FALLBACK: &str = "onRemove";
