//! Project model: a named build unit and its classpath scopes.
//!
//! A scope is a named classpath bucket with an independently resolved
//! dependency list. The five scopes mirror the phases of a JVM build:
//! compile, compile-provided, compile-runtime, test-provided, test.

use std::sync::Arc;

use crate::resolver::ClasspathDependency;

/// The classpath scopes of a project, in the order the interceptor
/// pipeline walks them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Scope {
    /// Dependencies needed to compile production sources.
    Compile,
    /// Compile-time-only dependencies provided by the runtime container.
    CompileProvided,
    /// Runtime dependencies not needed at compile time.
    CompileRuntime,
    /// Test compile-time-only dependencies provided by the container.
    TestProvided,
    /// Dependencies needed to compile and run tests.
    Test,
}

impl Scope {
    /// All scopes, in pipeline order.
    pub const ALL: [Scope; 5] = [
        Scope::Compile,
        Scope::CompileProvided,
        Scope::CompileRuntime,
        Scope::TestProvided,
        Scope::Test,
    ];

    /// Stable name for logging and display.
    pub fn as_str(self) -> &'static str {
        match self {
            Scope::Compile => "compile",
            Scope::CompileProvided => "compile-provided",
            Scope::CompileRuntime => "compile-runtime",
            Scope::TestProvided => "test-provided",
            Scope::Test => "test",
        }
    }
}

/// A dependency list as held by one scope.
pub type DependencyList = Vec<Arc<dyn ClasspathDependency>>;

/// A named build unit carrying one dependency list per scope.
///
/// Scope lists are populated by the surrounding build system (from the
/// resolved tree, via [`crate::resolver::ResolvedTree::classpath`]) and
/// rewritten in place by the interceptor pipeline.
pub struct Project {
    /// Project name, as given by the build configuration.
    pub name: String,
    compile: DependencyList,
    compile_provided: DependencyList,
    compile_runtime: DependencyList,
    test_provided: DependencyList,
    test: DependencyList,
}

impl Project {
    /// Create a project with empty scope lists.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            compile: Vec::new(),
            compile_provided: Vec::new(),
            compile_runtime: Vec::new(),
            test_provided: Vec::new(),
            test: Vec::new(),
        }
    }

    /// The dependency list of `scope`.
    pub fn dependencies(&self, scope: Scope) -> &[Arc<dyn ClasspathDependency>] {
        match scope {
            Scope::Compile => &self.compile,
            Scope::CompileProvided => &self.compile_provided,
            Scope::CompileRuntime => &self.compile_runtime,
            Scope::TestProvided => &self.test_provided,
            Scope::Test => &self.test,
        }
    }

    /// Append a dependency to `scope`.
    pub fn add_dependency(&mut self, scope: Scope, dependency: Arc<dyn ClasspathDependency>) {
        self.list_mut(scope).push(dependency);
    }

    /// Replace the dependency list of `scope` wholesale.
    pub fn set_dependencies(&mut self, scope: Scope, dependencies: DependencyList) {
        *self.list_mut(scope) = dependencies;
    }

    fn list_mut(&mut self, scope: Scope) -> &mut DependencyList {
        match scope {
            Scope::Compile => &mut self.compile,
            Scope::CompileProvided => &mut self.compile_provided,
            Scope::CompileRuntime => &mut self.compile_runtime,
            Scope::TestProvided => &mut self.test_provided,
            Scope::Test => &mut self.test,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scope_names_are_stable() {
        let names: Vec<&str> = Scope::ALL.iter().map(|s| s.as_str()).collect();
        assert_eq!(
            names,
            vec!["compile", "compile-provided", "compile-runtime", "test-provided", "test"]
        );
    }

    #[test]
    fn new_project_has_empty_scopes() {
        let project = Project::new("demo");
        for scope in Scope::ALL {
            assert!(project.dependencies(scope).is_empty());
        }
    }
}
