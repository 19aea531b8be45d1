//! Generation driver
//!
//! Runs the whole pipeline in the one order that is valid:
//!
//! 1. velocity feature reconciliation against the configured registry, then
//!    contract annotation of every class version and member
//! 2. projection of every class version, ascending per class
//! 3. interface-name inclusion per version and kind
//! 4. property layout per class
//!
//! Any error aborts the run. A [`GenerationPlan`] is only ever returned
//! complete.

use serde::Serialize;
use tracing::info;
use typeproj_contracts::ContractResolver;
use typeproj_core::{ContractReference, MemberId, Result, TypeGraph, TypeId};
use typeproj_engine::{
    InclusionResolver, InterfaceKind, ProjectedMembers, ProjectionEngine, ProjectorConfig,
};
use typeproj_layout::{ClassLayout, LayoutPlanner};

/// One generated interface of a class version
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InterfacePlan {
    /// Interface kind
    pub kind: InterfaceKind,
    /// Generated name, e.g. `IButtonStatics2`
    pub name: String,
    /// Whether the name must be written explicitly
    pub explicit: bool,
}

/// Contract attribute of one projected member
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MemberContractPlan {
    /// The member
    pub member: MemberId,
    /// Member name
    pub name: String,
    /// Contract versions the member supports
    pub contracts: Vec<ContractReference>,
}

/// Everything emitted for one class version
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClassVersionPlan {
    /// Version number
    pub version: u32,
    /// Interface-name suffix
    pub suffix: String,
    /// Concrete contract version the version ships in
    pub contract: Option<ContractReference>,
    /// Velocity version, if velocity-scoped
    pub velocity_version: Option<u32>,
    /// Members introduced or changed at this version
    pub members: ProjectedMembers,
    /// Contract attributes of those members, omitting members with none
    pub member_contracts: Vec<MemberContractPlan>,
    /// Interfaces with members or an explicit name
    pub interfaces: Vec<InterfacePlan>,
}

impl ClassVersionPlan {
    /// Interface of one kind, if generated
    pub fn interface(&self, kind: InterfaceKind) -> Option<&InterfacePlan> {
        self.interfaces.iter().find(|i| i.kind == kind)
    }

    /// Contracts a projected member supports; empty if none
    pub fn contracts_of(&self, member: MemberId) -> &[ContractReference] {
        self.member_contracts
            .iter()
            .find(|m| m.member == member)
            .map_or(&[], |m| m.contracts.as_slice())
    }

    /// Whether the `kind` name must be emitted explicitly
    pub fn is_explicit(&self, kind: InterfaceKind) -> bool {
        self.interface(kind).map_or(false, |i| i.explicit)
    }
}

/// Everything emitted for one class
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClassPlan {
    /// The class
    pub class: TypeId,
    /// Fully-qualified name
    pub name: String,
    /// Property layout, shared by every version
    pub layout: ClassLayout,
    /// Per-version plans, ascending
    pub versions: Vec<ClassVersionPlan>,
}

impl ClassPlan {
    /// Plan of one version
    pub fn version(&self, version: u32) -> Option<&ClassVersionPlan> {
        self.versions.iter().find(|v| v.version == version)
    }
}

/// Output of a generation run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct GenerationPlan {
    /// Classes in declaration order
    pub classes: Vec<ClassPlan>,
}

impl GenerationPlan {
    /// Plan of a class by fully-qualified name
    pub fn class(&self, name: &str) -> Option<&ClassPlan> {
        self.classes.iter().find(|c| c.name == name)
    }

    /// Total class versions planned
    pub fn version_count(&self) -> usize {
        self.classes.iter().map(|c| c.versions.len()).sum()
    }
}

/// Drives a generation run over a graph
pub struct Generator<'a> {
    graph: &'a TypeGraph,
    resolver: &'a ContractResolver,
    config: &'a ProjectorConfig,
}

impl<'a> Generator<'a> {
    /// Create a generator
    pub fn new(
        graph: &'a TypeGraph,
        resolver: &'a ContractResolver,
        config: &'a ProjectorConfig,
    ) -> Self {
        Generator {
            graph,
            resolver,
            config,
        }
    }

    /// Run the pipeline
    ///
    /// # Errors
    ///
    /// Fails on the first input-corruption, ordering or capacity error; no
    /// partial plan is returned.
    pub fn run(&self) -> Result<GenerationPlan> {
        let graph = self.graph;
        self.config.velocity_registry()?.reconcile(graph)?;
        let annotations = self.resolver.annotate(graph)?;
        let engine = ProjectionEngine::new(graph);
        let inclusion =
            InclusionResolver::new(&engine, &annotations, &self.config.legacy_interface_carve_outs);
        let layout = LayoutPlanner::new(graph)?;

        let mut plan = GenerationPlan::default();
        for (class, _) in graph.classes() {
            let decisions = inclusion.resolve_class(class)?;
            let short_name = graph.type_def(class)?.name();

            let mut versions = Vec::new();
            for (version, flags) in &decisions.versions {
                let projection = engine.project(class, *version)?;
                let mut interfaces = Vec::new();
                for kind in InterfaceKind::ALL {
                    let explicit = flags.get(kind);
                    if explicit || kind.has_members(graph, &projection)? {
                        interfaces.push(InterfacePlan {
                            kind,
                            name: kind.interface_name(short_name, projection.suffix()),
                            explicit,
                        });
                    }
                }
                let member_contracts = projection
                    .members()
                    .iter()
                    .filter_map(|member| {
                        let contracts = annotations.member_contracts(member);
                        if contracts.is_empty() {
                            return None;
                        }
                        Some(graph.member(member).map(|m| MemberContractPlan {
                            member,
                            name: m.name().to_string(),
                            contracts: contracts.to_vec(),
                        }))
                    })
                    .collect::<Result<Vec<_>>>()?;
                versions.push(ClassVersionPlan {
                    version: *version,
                    suffix: projection.suffix().to_string(),
                    contract: annotations.version_contract(class, *version).cloned(),
                    velocity_version: projection.velocity_version(),
                    members: projection.members().clone(),
                    member_contracts,
                    interfaces,
                });
            }

            plan.classes.push(ClassPlan {
                class,
                name: graph.type_name(class).to_string(),
                layout: layout.class_layout(class)?,
                versions,
            });
        }

        let metrics = engine.metrics();
        info!(
            target: "typeproj::generate",
            classes = plan.classes.len(),
            versions = plan.version_count(),
            projections = metrics.computed,
            "Generation plan complete"
        );
        Ok(plan)
    }
}

/// Build a contract resolver from a config's release table
pub fn resolver_for(graph: &TypeGraph, config: &ProjectorConfig) -> Result<ContractResolver> {
    Ok(ContractResolver::new(config.release_table(graph)?))
}

/// Resolve contracts from `config` and run a generator in one step
pub fn generate(graph: &TypeGraph, config: &ProjectorConfig) -> Result<GenerationPlan> {
    let resolver = resolver_for(graph, config)?;
    Generator::new(graph, &resolver, config).run()
}
