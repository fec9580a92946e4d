//! Tree service
//!
//! Resolves a request (height, root, rule text) into a built tree and runs
//! the inspectors against it.

use tracing::{debug, info, instrument};

use crate::application::ApplicationResult;
use crate::config::Settings;
use crate::domain::{
    flatten_level_order, height_of, leaf_values, node_count, validate_height, AssocTree, Node,
    TreeBuilder,
};

/// Scalar type used for trees built from settings and the command line.
pub type Value = i128;

/// Parameters of one build.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeRequest {
    pub height: i64,
    pub root: Value,
    pub left: String,
    pub right: String,
    /// Cache generator results for the duration of the build
    pub memoize: bool,
}

impl From<&Settings> for TreeRequest {
    fn from(settings: &Settings) -> Self {
        Self {
            height: settings.height,
            root: Value::from(settings.root),
            left: settings.left.clone(),
            right: settings.right.clone(),
            memoize: settings.memoize,
        }
    }
}

/// Service for building and inspecting trees.
#[derive(Debug, Clone)]
pub struct TreeService {
    request: TreeRequest,
}

impl TreeService {
    pub fn new(request: TreeRequest) -> Self {
        Self { request }
    }

    pub fn request(&self) -> &TreeRequest {
        &self.request
    }

    /// Build the requested tree in object form.
    ///
    /// The height is validated before the rules are resolved, so a negative
    /// height wins over an unknown rule.
    #[instrument(level = "debug", skip(self), fields(height = self.request.height))]
    pub fn build(&self) -> ApplicationResult<Option<Node<Value>>> {
        let req = &self.request;
        validate_height(req.height)?;
        let builder = TreeBuilder::<Value>::from_rules(&req.left, &req.right)?;
        debug!(left = %req.left, right = %req.right, memoize = req.memoize, "rules resolved");

        let tree = if req.memoize {
            builder.build_memoized(req.height, req.root)?
        } else {
            builder.build(req.height, req.root)?
        };
        info!(
            height = req.height,
            nodes = node_count(tree.as_ref()),
            "built tree"
        );
        Ok(tree)
    }

    pub fn build_associative(&self) -> ApplicationResult<Option<AssocTree<Value>>> {
        Ok(self.build()?.map(|node| node.to_associative()))
    }

    pub fn flatten(&self) -> ApplicationResult<Vec<Option<Value>>> {
        Ok(flatten_level_order(self.build()?.as_ref()))
    }

    pub fn height(&self) -> ApplicationResult<usize> {
        Ok(height_of(self.build()?.as_ref()))
    }

    pub fn count(&self) -> ApplicationResult<usize> {
        Ok(node_count(self.build()?.as_ref()))
    }

    pub fn leaves(&self) -> ApplicationResult<Vec<Value>> {
        Ok(leaf_values(self.build()?.as_ref()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ApplicationError;
    use crate::domain::DomainError;

    fn request(height: i64, left: &str, right: &str) -> TreeRequest {
        TreeRequest {
            height,
            root: 1,
            left: left.into(),
            right: right.into(),
            memoize: false,
        }
    }

    #[test]
    fn given_default_settings_when_building_then_produces_default_tree() {
        let service = TreeService::new(TreeRequest::from(&Settings::default()));
        let tree = service.build().unwrap().unwrap();
        assert_eq!(tree.value, 12);
        assert_eq!(service.height().unwrap(), 4);
        assert_eq!(service.count().unwrap(), 15);
    }

    #[test]
    fn given_negative_height_and_bad_rule_when_building_then_reports_height() {
        let service = TreeService::new(request(-1, "bogus", "cube"));
        let err = service.build().unwrap_err();
        assert!(matches!(
            err,
            ApplicationError::Domain(DomainError::InvalidArgument(-1))
        ));
    }

    #[test]
    fn given_unknown_rule_when_building_then_type_mismatch() {
        let service = TreeService::new(request(2, "cube", "sqrt"));
        let err = service.build().unwrap_err();
        assert!(matches!(
            err,
            ApplicationError::Domain(DomainError::TypeMismatch { .. })
        ));
    }

    #[test]
    fn given_custom_rules_when_flattening_then_level_order() {
        let service = TreeService::new(request(2, "mul:2", "add:3"));
        assert_eq!(service.flatten().unwrap(), vec![Some(1), Some(2), Some(4)]);
        assert_eq!(service.leaves().unwrap(), vec![2, 4]);
    }

    #[test]
    fn given_memoize_when_building_then_same_tree() {
        let mut req = request(4, "square", "double-minus-one");
        let plain = TreeService::new(req.clone()).build().unwrap();
        req.memoize = true;
        let memo = TreeService::new(req).build().unwrap();
        assert_eq!(plain, memo);
    }

    #[test]
    fn given_zero_height_when_inspecting_then_empty() {
        let service = TreeService::new(request(0, "cube", "cube"));
        assert!(service.build().unwrap().is_none());
        assert!(service.flatten().unwrap().is_empty());
        assert_eq!(service.height().unwrap(), 0);
        assert!(service.build_associative().unwrap().is_none());
    }
}
