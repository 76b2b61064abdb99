//! Wire/runtime value types shared by the compiler and the VM.

use atlas_component::Entity;

/// The VM's instruction set. All operands are 32-bit; all stack/local
/// values are 64-bit signed integers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum OpCode {
    /// No effect.
    Nop = 0,
    /// Push `constants[a]`.
    LoadConst,
    /// Push `locals[a]` (missing slot reads as 0).
    LoadVar,
    /// Pop top; assign to `locals[a]`.
    StoreVar,
    /// Pop b, pop a, push `a + b` (wrapping).
    Add,
    /// Pop b, pop a, push `a - b` (wrapping).
    Sub,
    /// Pop b, pop a, push `a * b` (wrapping).
    Mul,
    /// Pop b, pop a, push `a / b` when `b != 0`, else push `0`.
    Div,
    /// Pop b, pop a, push `1` if equal else `0`.
    CmpEq,
    /// Pop b, pop a, push `1` if `a < b` else `0`.
    CmpLt,
    /// Pop b, pop a, push `1` if `a > b` else `0`.
    CmpGt,
    /// Set the instruction pointer to `a`.
    Jump,
    /// Pop v; if `v == 0`, jump to `a`; else fall through.
    JumpIfFalse,
    /// Route an event tagged `a` to the bound sink, if any. Does not touch
    /// the stack.
    EmitEvent,
    /// Terminate execution.
    End,
}

impl OpCode {
    /// The number of defined opcodes, used by the asset codec's bounds
    /// check (`0..COUNT` are valid raw byte values).
    pub const COUNT: u8 = 15;

    /// Decodes a raw opcode byte. An out-of-range byte is treated as `End`
    /// and logged, per the core's policy for corrupt bytecode: the engine
    /// loop must never fault on an invalid opcode.
    #[must_use]
    pub fn from_byte(byte: u8) -> Self {
        match byte {
            0 => OpCode::Nop,
            1 => OpCode::LoadConst,
            2 => OpCode::LoadVar,
            3 => OpCode::StoreVar,
            4 => OpCode::Add,
            5 => OpCode::Sub,
            6 => OpCode::Mul,
            7 => OpCode::Div,
            8 => OpCode::CmpEq,
            9 => OpCode::CmpLt,
            10 => OpCode::CmpGt,
            11 => OpCode::Jump,
            12 => OpCode::JumpIfFalse,
            13 => OpCode::EmitEvent,
            14 => OpCode::End,
            other => {
                tracing::warn!(opcode = other, "unknown opcode byte; treating as END");
                OpCode::End
            }
        }
    }

    /// Encodes this opcode back to its raw byte value.
    #[must_use]
    pub fn to_byte(self) -> u8 {
        self as u8
    }

    /// `true` for `Jump` and `JumpIfFalse` — opcodes whose `a` operand is
    /// interpreted as an instruction-pointer target.
    #[must_use]
    pub fn is_jump(self) -> bool {
        matches!(self, OpCode::Jump | OpCode::JumpIfFalse)
    }
}

/// One VM instruction. `a`, `b`, `c` are opcode-dependent 32-bit operand
/// slots; most opcodes use only `a`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Instruction {
    /// The operation to perform.
    pub opcode: OpCode,
    /// First operand slot.
    pub a: u32,
    /// Second operand slot.
    pub b: u32,
    /// Third operand slot.
    pub c: u32,
}

impl Instruction {
    /// Convenience constructor for opcodes that only use the `a` operand.
    #[must_use]
    pub fn new(opcode: OpCode, a: u32) -> Self {
        Self { opcode, a, b: 0, c: 0 }
    }

    /// Convenience constructor for opcodes that use no operands.
    #[must_use]
    pub fn bare(opcode: OpCode) -> Self {
        Self::new(opcode, 0)
    }
}

/// A compiled program: a constant pool plus a linear instruction stream.
/// The last instruction is always `End`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Bytecode {
    /// The constant pool, in the order constants were encountered during
    /// compilation.
    pub constants: Vec<i64>,
    /// The instruction stream.
    pub instructions: Vec<Instruction>,
}

/// Per-execution context, supplied by the caller and not mutated by the VM.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct VmContext {
    /// The entity this execution is running on behalf of.
    pub entity: Entity,
    /// The scheduler tick this execution is running during.
    pub tick: u64,
}
