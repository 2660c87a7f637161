//! Shared test helpers for axent-core integration tests.
//!
//! Provides a programmable in-memory [`MockDriver`] plus terse node
//! constructors for building synthetic accessibility trees.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use axent_core::driver::{AutomationDriver, DriverError};
use axent_core::node::{AxNode, NodeFrame};

/// Behavior of one `dump_tree` call on a scripted mock.
pub enum MockDump {
    /// Return this tree.
    Tree(Vec<AxNode>),
    /// Fail the call.
    Fail,
}

/// An [`AutomationDriver`] test double.
///
/// `dump_tree` consumes scripted behaviors first and then serves the
/// fallback tree forever; the fallback can be swapped mid-test to simulate
/// a changing UI. Every dump is counted and every tap recorded.
pub struct MockDriver {
    script: Mutex<VecDeque<MockDump>>,
    fallback: Mutex<Vec<AxNode>>,
    dumps: AtomicUsize,
    taps: Mutex<Vec<(f64, f64)>>,
}

impl MockDriver {
    /// A driver that always serves `tree`.
    pub fn with_tree(tree: Vec<AxNode>) -> Arc<Self> {
        Self::scripted(Vec::new(), tree)
    }

    /// A driver with per-call scripted behavior, then `fallback` forever.
    pub fn scripted(script: Vec<MockDump>, fallback: Vec<AxNode>) -> Arc<Self> {
        Arc::new(Self {
            script: Mutex::new(script.into()),
            fallback: Mutex::new(fallback),
            dumps: AtomicUsize::new(0),
            taps: Mutex::new(Vec::new()),
        })
    }

    /// Replaces the fallback tree (simulates the UI changing).
    pub fn set_tree(&self, tree: Vec<AxNode>) {
        *self.fallback.lock().unwrap() = tree;
    }

    /// How many times `dump_tree` has been called.
    pub fn dump_count(&self) -> usize {
        self.dumps.load(Ordering::SeqCst)
    }

    /// Every tap delivered so far, in order.
    pub fn taps(&self) -> Vec<(f64, f64)> {
        self.taps.lock().unwrap().clone()
    }
}

#[async_trait]
impl AutomationDriver for MockDriver {
    async fn dump_tree(&self) -> Result<Vec<AxNode>, DriverError> {
        self.dumps.fetch_add(1, Ordering::SeqCst);
        if let Some(behavior) = self.script.lock().unwrap().pop_front() {
            return match behavior {
                MockDump::Tree(tree) => Ok(tree),
                MockDump::Fail => Err(DriverError::NotConnected),
            };
        }
        Ok(self.fallback.lock().unwrap().clone())
    }

    async fn tap_location(&self, x: f64, y: f64) -> Result<(), DriverError> {
        self.taps.lock().unwrap().push((x, y));
        Ok(())
    }
}

/// A node of the given kind with no other attributes.
pub fn node(kind: &str) -> AxNode {
    AxNode {
        kind: Some(kind.to_string()),
        ..Default::default()
    }
}

/// A node of the given kind with an identifier.
pub fn node_id(kind: &str, id: &str) -> AxNode {
    AxNode {
        identifier: Some(id.to_string()),
        ..node(kind)
    }
}

/// A node of the given kind with a label.
pub fn node_label(kind: &str, label: &str) -> AxNode {
    AxNode {
        label: Some(label.to_string()),
        ..node(kind)
    }
}

/// Attaches children to a node.
pub fn with_children(mut parent: AxNode, children: Vec<AxNode>) -> AxNode {
    parent.children = children;
    parent
}

/// Attaches a frame to a node.
pub fn with_frame(mut node: AxNode, x: f64, y: f64, width: f64, height: f64) -> AxNode {
    node.frame = Some(NodeFrame {
        x,
        y,
        width,
        height,
    });
    node
}
