// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Wiring of configuration into the resolver and dispatcher

use anyhow::Context as _;
use op_adapters::{
    HttpOperator, NoOpOperator, OperatorClient, StoreCluster, StoreEnvironment,
    TracedClusterBackend, TracedEnvironmentBackend, TracedOperator,
};
use op_core::Config;
use op_engine::{Environments, Handlers, OperationResolver, PhaseDispatcher, SourceKind};
use std::path::{Path, PathBuf};

pub type CliResolver = OperationResolver<
    TracedClusterBackend<StoreCluster>,
    TracedEnvironmentBackend<StoreEnvironment>,
    TracedOperator<Box<dyn OperatorClient>>,
>;

pub type CliDispatcher = PhaseDispatcher<
    TracedClusterBackend<StoreCluster>,
    TracedEnvironmentBackend<StoreEnvironment>,
    TracedOperator<Box<dyn OperatorClient>>,
>;

pub struct Context {
    pub config: Config,
    pub env: Environments,
}

impl Context {
    pub fn load(config_path: Option<&Path>, state_dir: Option<PathBuf>) -> anyhow::Result<Self> {
        let config =
            Config::discover(config_path, state_dir).context("failed to load configuration")?;
        let env = Environments::from_config(&config);
        Ok(Self { config, env })
    }

    /// Resolver over every local store plus the operator API.
    ///
    /// The update and join stores are only consulted when they exist.
    pub fn resolver(&self) -> CliResolver {
        let store = |name: &'static str, dir: &Path| {
            TracedEnvironmentBackend::new(name, StoreEnvironment::new(dir))
        };

        let mut resolver = OperationResolver::new()
            .with_cluster(TracedClusterBackend::new(StoreCluster::new(
                &self.env.cluster_dir,
            )))
            .with_operator(TracedOperator::new(self.operator()))
            .with_wizard(store("wizard", self.env.wizard_dir.as_path()));
        if let Some(dir) = &self.env.update_dir {
            resolver = resolver.with_update_env(store("update", dir.as_path()));
        }
        if let Some(dir) = &self.env.join_dir {
            resolver = resolver.with_join_env(store("join", dir.as_path()));
        }
        resolver
    }

    pub fn dispatcher(&self) -> CliDispatcher {
        PhaseDispatcher::new(self.resolver(), Handlers::journal(), self.env.clone())
    }

    /// Local store directory a source reads from, if any
    pub fn source_dir(&self, source: SourceKind) -> Option<&Path> {
        match source {
            SourceKind::Cluster => Some(&self.env.cluster_dir),
            SourceKind::Wizard => Some(&self.env.wizard_dir),
            SourceKind::UpdateEnv => self.env.update_dir.as_deref(),
            SourceKind::JoinEnv => self.env.join_dir.as_deref(),
            SourceKind::Operator => None,
        }
    }

    fn operator(&self) -> Box<dyn OperatorClient> {
        match &self.config.operator_url {
            Some(url) => Box::new(HttpOperator::new(url.clone(), self.config.operator_timeout)),
            None => Box::new(NoOpOperator::new()),
        }
    }
}
