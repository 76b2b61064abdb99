//! [`GraphCompiler`] — lowers a [`Graph`] to [`Bytecode`].

use atlas_graph::{Graph, Node, NodeType};

use crate::bytecode::{Bytecode, Instruction, OpCode};

/// Lowers a [`Graph`] to [`Bytecode`].
///
/// Deterministic and total: every call walks `graph.nodes` in stored order
/// and emits one instruction per node, then a terminating `End`. Carries no
/// state between calls.
#[derive(Debug, Default)]
pub struct GraphCompiler;

impl GraphCompiler {
    /// Creates a compiler. Stateless — equivalent to `GraphCompiler::default()`.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Compiles `graph` into a fresh [`Bytecode`] value.
    #[must_use]
    pub fn compile(&self, graph: &Graph) -> Bytecode {
        let mut bc = Bytecode::default();
        for node in &graph.nodes {
            self.emit_node(node, &mut bc);
        }
        bc.instructions.push(Instruction::bare(OpCode::End));
        bc
    }

    fn emit_node(&self, node: &Node, bc: &mut Bytecode) {
        match node.node_type {
            NodeType::Constant => {
                let idx = bc.constants.len() as u32;
                bc.constants.push(node.constant_value);
                bc.instructions.push(Instruction::new(OpCode::LoadConst, idx));
            }
            NodeType::Add => bc.instructions.push(Instruction::bare(OpCode::Add)),
            NodeType::Sub => bc.instructions.push(Instruction::bare(OpCode::Sub)),
            NodeType::Mul => bc.instructions.push(Instruction::bare(OpCode::Mul)),
            NodeType::Div => bc.instructions.push(Instruction::bare(OpCode::Div)),
            NodeType::CompareLT => bc.instructions.push(Instruction::bare(OpCode::CmpLt)),
            NodeType::Branch => {
                // The node's own id becomes the jump target, not its ordinal
                // position in the emitted stream. Preserved intentionally
                // for equivalence with existing compiled assets — see
                // atlas_vm::validate_jumps for a host-side sanity check.
                bc.instructions
                    .push(Instruction::new(OpCode::JumpIfFalse, node.id));
            }
            NodeType::Event => {
                bc.instructions
                    .push(Instruction::new(OpCode::EmitEvent, node.constant_value as u32));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use atlas_component::Entity;
    use atlas_graph::{Edge, Node};

    use crate::bytecode::VmContext;
    use crate::vm::GraphVm;

    fn node(id: u32, node_type: NodeType, constant_value: i64) -> Node {
        Node { id, node_type, constant_value }
    }

    #[test]
    fn compile_constant_emits_load_const_with_fresh_index() {
        let compiler = GraphCompiler::new();
        let graph = Graph {
            nodes: vec![node(0, NodeType::Constant, 7)],
            edges: vec![],
            entry: 0,
        };
        let bc = compiler.compile(&graph);
        assert_eq!(bc.constants, vec![7]);
        assert_eq!(bc.instructions[0], Instruction::new(OpCode::LoadConst, 0));
        assert_eq!(bc.instructions[1], Instruction::bare(OpCode::End));
    }

    #[test]
    fn duplicate_constant_values_get_distinct_pool_slots() {
        let compiler = GraphCompiler::new();
        let graph = Graph {
            nodes: vec![
                node(0, NodeType::Constant, 5),
                node(1, NodeType::Constant, 5),
            ],
            edges: vec![],
            entry: 0,
        };
        let bc = compiler.compile(&graph);
        assert_eq!(bc.constants, vec![5, 5]);
    }

    #[test]
    fn compile_then_execute_multiply() {
        let compiler = GraphCompiler::new();
        let graph = Graph {
            nodes: vec![
                node(0, NodeType::Constant, 7),
                node(1, NodeType::Constant, 6),
                node(2, NodeType::Mul, 0),
            ],
            edges: vec![],
            entry: 0,
        };
        let mut bc = compiler.compile(&graph);
        // Strip the compiler's trailing `End`, then append a store + `End`
        // so the multiplication result lands somewhere observable.
        bc.instructions.pop();
        bc.instructions.push(Instruction::new(OpCode::StoreVar, 0));
        bc.instructions.push(Instruction::bare(OpCode::End));

        let mut vm = GraphVm::new();
        vm.execute(&bc, &VmContext { entity: Entity::from_raw(1), tick: 0 });
        assert_eq!(vm.get_local(0), 42);
    }

    #[test]
    fn branch_jump_target_is_the_node_id_not_the_instruction_index() {
        let compiler = GraphCompiler::new();
        // Node ids deliberately do not equal ordinal position.
        let graph = Graph {
            nodes: vec![node(10, NodeType::Branch, 0)],
            edges: vec![Edge { from: 10, to: 10 }],
            entry: 0,
        };
        let bc = compiler.compile(&graph);
        assert_eq!(bc.instructions[0].a, 10);
    }
}
