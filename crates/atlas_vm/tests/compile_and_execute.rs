use atlas_component::Entity;
use atlas_graph::{Graph, Node, NodeType};
use atlas_vm::{GraphCompiler, GraphVm, Instruction, OpCode, VmContext};

fn node(id: u32, node_type: NodeType, constant_value: i64) -> Node {
    Node { id, node_type, constant_value }
}

#[test]
fn compiled_add_graph_executes_to_expected_sum() {
    let compiler = GraphCompiler::new();
    let graph = Graph {
        nodes: vec![
            node(0, NodeType::Constant, 10),
            node(1, NodeType::Constant, 20),
            node(2, NodeType::Add, 0),
        ],
        edges: vec![],
        entry: 0,
    };
    let mut bc = compiler.compile(&graph);
    bc.instructions.pop();
    bc.instructions.push(Instruction::new(OpCode::StoreVar, 0));
    bc.instructions.push(Instruction::bare(OpCode::End));

    let mut vm = GraphVm::new();
    vm.execute(
        &bc,
        &VmContext {
            entity: Entity::from_raw(1),
            tick: 3,
        },
    );
    assert_eq!(vm.get_local(0), 30);
}

#[test]
fn compiled_div_graph_handles_division_by_zero() {
    let compiler = GraphCompiler::new();
    let graph = Graph {
        nodes: vec![
            node(0, NodeType::Constant, 100),
            node(1, NodeType::Constant, 0),
            node(2, NodeType::Div, 0),
        ],
        edges: vec![],
        entry: 0,
    };
    let mut bc = compiler.compile(&graph);
    bc.instructions.pop();
    bc.instructions.push(Instruction::new(OpCode::StoreVar, 0));
    bc.instructions.push(Instruction::bare(OpCode::End));

    let mut vm = GraphVm::new();
    vm.execute(&bc, &VmContext::default());
    assert_eq!(vm.get_local(0), 0);
}
