#![no_main]

use std::cell::RefCell;
use std::rc::Rc;

use libfuzzer_sys::fuzz_target;
use rime_core::freeze::{FreezeRegistry, deep_freeze_with};
use rime_core::objects::js_function::SharedFunctionInfo;
use rime_core::objects::js_object::JsObject;
use rime_core::objects::map::PropertyAttributes;
use rime_core::objects::value::JsValue;

const NODE_COUNT: usize = 16;

fn noop(_args: &[JsValue]) -> rime_core::error::RimeResult<JsValue> {
    Ok(JsValue::Undefined)
}

// Build a random object graph (cycles and shared subgraphs included) from
// the fuzz input, deep-freeze it, and verify that the traversal terminates
// with the whole reachable closure frozen, recorded, and idempotent on a
// second call.
//
// Each edge is encoded in two bytes:
//   byte 0  bits [3:0] – source node
//           bits [5:4] – edge kind (data property / element / prototype /
//                        accessor getter)
//   byte 1  bits [3:0] – target node
fuzz_target!(|data: &[u8]| {
    // Every fifth node is a function object so accessor edges and callable
    // entities show up in the graph.
    let nodes: Vec<Rc<RefCell<JsObject>>> = (0..NODE_COUNT)
        .map(|i| {
            if i % 5 == 4 {
                Rc::new(RefCell::new(JsObject::new_function(
                    SharedFunctionInfo::new("f", 0),
                    noop,
                )))
            } else {
                Rc::new(RefCell::new(JsObject::new()))
            }
        })
        .collect();

    let mut edge = 0usize;
    for chunk in data.chunks_exact(2) {
        let from = &nodes[(chunk[0] & 0x0f) as usize];
        let to = &nodes[(chunk[1] & 0x0f) as usize];
        let kind = (chunk[0] >> 4) & 0x3;
        let value = JsValue::object(Rc::clone(to));
        edge += 1;
        match kind {
            0 => {
                let _ = from.borrow_mut().set_property(format!("e{edge}"), value);
            }
            1 => {
                let _ = from.borrow_mut().set_element(edge % 8, value);
            }
            2 => {
                let _ = from.borrow_mut().set_prototype(Some(Rc::clone(to)));
            }
            _ => {
                let target_is_callable = to.borrow().is_callable();
                if target_is_callable {
                    let _ = from.borrow_mut().define_accessor(
                        format!("a{edge}"),
                        Some(Rc::clone(to)),
                        None,
                        PropertyAttributes::default(),
                    );
                }
            }
        }
    }

    let mut registry = FreezeRegistry::new();
    let root = JsValue::object(Rc::clone(&nodes[0]));
    deep_freeze_with(&mut registry, &root).expect("graph of ordinary/callable nodes must freeze");
    assert!(nodes[0].borrow().is_frozen());
    assert!(registry.contains(&nodes[0]));

    // Idempotence: a second call over the same registry succeeds.
    deep_freeze_with(&mut registry, &root).expect("second freeze is a no-op");

    // Frozen-ness and registration must agree for every node.
    for node in &nodes {
        assert_eq!(node.borrow().is_frozen(), registry.contains(node));
    }
});
