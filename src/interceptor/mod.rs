//! Classpath interceptor pipeline.
//!
//! Interceptors are pluggable transformers over a scope's dependency
//! list, typically contributed by build plugins. The pipeline runs
//! independently for each of the five scopes of a [`Project`].
//!
//! # Composition semantics
//!
//! When several interceptors are registered the pipeline is a
//! **fan-out/merge**, not a sequential pipe: every interceptor is invoked
//! with the *same original, unmodified* scope list, and their outputs are
//! concatenated in registration order to form the replacement list. Two
//! interceptors that each return the full list will therefore duplicate
//! it. No deduplication happens here; that is the caller's concern.
//!
//! A sequential pipe (`B(A(L))`) is what an "interceptor chain" would
//! usually suggest, but plugins are written against the fan-out contract:
//! each one sees the pristine list and contributes a slice of the
//! replacement. Changing this silently would reorder or drop entries for
//! any build with more than one interceptor, so the composition is part
//! of the compatibility surface and pinned by the pipeline tests.

use std::sync::Arc;

use tracing::debug;

use crate::project::{Project, Scope};
use crate::resolver::ClasspathDependency;

/// A pluggable transformer over a scope's dependency list.
///
/// Implementations receive the project (for context: name, other scopes)
/// and the scope's original dependency list, and return their
/// contribution to the replacement list.
pub trait ClasspathInterceptor: Send + Sync {
    /// Transform a dependency list for a project.
    fn intercept(
        &self,
        project: &Project,
        dependencies: &[Arc<dyn ClasspathDependency>],
    ) -> Vec<Arc<dyn ClasspathDependency>>;
}

/// Interceptors collected in registration order.
#[derive(Default)]
pub struct InterceptorRegistry {
    interceptors: Vec<Box<dyn ClasspathInterceptor>>,
}

impl InterceptorRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an interceptor. Registration order is composition order.
    pub fn register(&mut self, interceptor: Box<dyn ClasspathInterceptor>) {
        self.interceptors.push(interceptor);
    }

    /// Number of registered interceptors.
    pub fn len(&self) -> usize {
        self.interceptors.len()
    }

    /// Whether no interceptors are registered.
    pub fn is_empty(&self) -> bool {
        self.interceptors.is_empty()
    }

    /// Apply every registered interceptor to `dependencies`.
    ///
    /// Each interceptor sees the same original list; outputs are
    /// concatenated in registration order (fan-out/merge, see the module
    /// docs). With an empty registry this simply clones the input.
    pub fn intercept(
        &self,
        project: &Project,
        dependencies: &[Arc<dyn ClasspathDependency>],
    ) -> Vec<Arc<dyn ClasspathDependency>> {
        if self.interceptors.is_empty() {
            return dependencies.to_vec();
        }
        let mut result = Vec::new();
        for interceptor in &self.interceptors {
            result.extend(interceptor.intercept(project, dependencies));
        }
        result
    }

    /// Run the pipeline over every scope of `project`, replacing each
    /// scope list with the merged interceptor output.
    ///
    /// With no interceptors registered the project is left untouched.
    pub fn run_classpath_interceptors(&self, project: &mut Project) {
        if self.interceptors.is_empty() {
            return;
        }
        for scope in Scope::ALL {
            let original = project.dependencies(scope).to_vec();
            let replaced = self.intercept(project, &original);
            debug!(
                "classpath interceptors rewrote scope {} of {}: {} -> {} entries",
                scope.as_str(),
                project.name,
                original.len(),
                replaced.len()
            );
            project.set_dependencies(scope, replaced);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Result;
    use std::path::PathBuf;

    struct Named(&'static str);

    impl ClasspathDependency for Named {
        fn id(&self) -> &str {
            self.0
        }

        fn is_optional(&self) -> bool {
            false
        }

        fn file(&self) -> Result<PathBuf> {
            Ok(PathBuf::from(self.0))
        }

        fn direct_dependencies(&self) -> Result<Vec<Arc<dyn ClasspathDependency>>> {
            Ok(Vec::new())
        }
    }

    fn dep(id: &'static str) -> Arc<dyn ClasspathDependency> {
        Arc::new(Named(id))
    }

    /// Appends a fixed suffix id after echoing the original list.
    struct EchoThen(&'static str);

    impl ClasspathInterceptor for EchoThen {
        fn intercept(
            &self,
            _project: &Project,
            dependencies: &[Arc<dyn ClasspathDependency>],
        ) -> Vec<Arc<dyn ClasspathDependency>> {
            let mut out = dependencies.to_vec();
            out.push(dep(self.0));
            out
        }
    }

    /// Keeps only the first element of whatever list it is given.
    struct KeepFirst;

    impl ClasspathInterceptor for KeepFirst {
        fn intercept(
            &self,
            _project: &Project,
            dependencies: &[Arc<dyn ClasspathDependency>],
        ) -> Vec<Arc<dyn ClasspathDependency>> {
            dependencies.iter().take(1).cloned().collect()
        }
    }

    fn ids(list: &[Arc<dyn ClasspathDependency>]) -> Vec<&str> {
        list.iter().map(|d| d.id()).collect()
    }

    #[test]
    fn empty_registry_returns_list_unchanged() {
        let registry = InterceptorRegistry::new();
        let project = Project::new("p");
        let original = vec![dep("a"), dep("b")];

        let result = registry.intercept(&project, &original);
        assert_eq!(ids(&result), vec!["a", "b"]);
    }

    #[test]
    fn empty_registry_leaves_project_untouched() {
        let registry = InterceptorRegistry::new();
        let mut project = Project::new("p");
        project.add_dependency(Scope::Compile, dep("a"));

        registry.run_classpath_interceptors(&mut project);
        assert_eq!(ids(project.dependencies(Scope::Compile)), vec!["a"]);
    }

    #[test]
    fn fan_out_concatenates_not_pipes() {
        // With a sequential pipe the result would be KeepFirst(EchoThen(L))
        // = ["a"]; the fan-out contract is EchoThen(L) ++ KeepFirst(L).
        let mut registry = InterceptorRegistry::new();
        registry.register(Box::new(EchoThen("extra")));
        registry.register(Box::new(KeepFirst));

        let project = Project::new("p");
        let original = vec![dep("a"), dep("b")];
        let result = registry.intercept(&project, &original);

        assert_eq!(ids(&result), vec!["a", "b", "extra", "a"]);
    }

    #[test]
    fn registration_order_is_concatenation_order() {
        let mut registry = InterceptorRegistry::new();
        registry.register(Box::new(KeepFirst));
        registry.register(Box::new(EchoThen("extra")));

        let project = Project::new("p");
        let original = vec![dep("a"), dep("b")];
        let result = registry.intercept(&project, &original);

        assert_eq!(ids(&result), vec!["a", "a", "b", "extra"]);
    }

    #[test]
    fn pipeline_replaces_every_scope_independently() {
        let mut registry = InterceptorRegistry::new();
        registry.register(Box::new(KeepFirst));

        let mut project = Project::new("p");
        project.add_dependency(Scope::Compile, dep("c1"));
        project.add_dependency(Scope::Compile, dep("c2"));
        project.add_dependency(Scope::Test, dep("t1"));
        project.add_dependency(Scope::Test, dep("t2"));

        registry.run_classpath_interceptors(&mut project);

        assert_eq!(ids(project.dependencies(Scope::Compile)), vec!["c1"]);
        assert_eq!(ids(project.dependencies(Scope::Test)), vec!["t1"]);
        assert!(project.dependencies(Scope::CompileRuntime).is_empty());
    }

    #[test]
    fn no_deduplication_is_performed() {
        let mut registry = InterceptorRegistry::new();
        registry.register(Box::new(EchoThen("x")));
        registry.register(Box::new(EchoThen("x")));

        let project = Project::new("p");
        let result = registry.intercept(&project, &[dep("a")]);
        assert_eq!(ids(&result), vec!["a", "x", "a", "x"]);
    }
}
