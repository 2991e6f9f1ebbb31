//! Command slot decoding
//!
//! A command slot value is a message number or an opcode depending on its
//! range:
//!
//! ```text
//! 0         no-op
//! 1..=51    message 1..=51
//! 52..=101  opcode value - 52
//! 102..     message value - 50
//! ```

use crate::action::ParamKind;

pub const MESSAGE_1_END: i32 = 51;
pub const MESSAGE_2_START: i32 = 102;
const OPCODE_BASE: i32 = MESSAGE_1_END + 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Opcode {
    Get,
    Drop,
    Goto,
    Destroy,
    Night,
    Day,
    SetFlag,
    Destroy2,
    ClearFlag,
    Dead,
    PutObject,
    Finish,
    Look,
    Score,
    Inventory,
    SetFlag0,
    ClearFlag0,
    Fill,
    ClearScreen,
    Save,
    SwapObjects,
    Continue,
    SuperGet,
    PutWith,
    Look2,
    DecrementCounter,
    PrintCounter,
    SetCounter,
    SwapRoom0,
    SwapCounter,
    AddCounter,
    SubtractCounter,
    SayNoun,
    SayNounLine,
    NewLine,
    SwapRoom,
    Delay,
}

const OPCODES: [Opcode; 37] = [
    Opcode::Get,
    Opcode::Drop,
    Opcode::Goto,
    Opcode::Destroy,
    Opcode::Night,
    Opcode::Day,
    Opcode::SetFlag,
    Opcode::Destroy2,
    Opcode::ClearFlag,
    Opcode::Dead,
    Opcode::PutObject,
    Opcode::Finish,
    Opcode::Look,
    Opcode::Score,
    Opcode::Inventory,
    Opcode::SetFlag0,
    Opcode::ClearFlag0,
    Opcode::Fill,
    Opcode::ClearScreen,
    Opcode::Save,
    Opcode::SwapObjects,
    Opcode::Continue,
    Opcode::SuperGet,
    Opcode::PutWith,
    Opcode::Look2,
    Opcode::DecrementCounter,
    Opcode::PrintCounter,
    Opcode::SetCounter,
    Opcode::SwapRoom0,
    Opcode::SwapCounter,
    Opcode::AddCounter,
    Opcode::SubtractCounter,
    Opcode::SayNoun,
    Opcode::SayNounLine,
    Opcode::NewLine,
    Opcode::SwapRoom,
    Opcode::Delay,
];

impl Opcode {
    pub fn from_index(index: i32) -> Option<Opcode> {
        usize::try_from(index)
            .ok()
            .and_then(|i| OPCODES.get(i))
            .copied()
    }

    pub fn index(self) -> i32 {
        OPCODES
            .iter()
            .position(|&op| op == self)
            .map_or(0, |i| i as i32)
    }

    /// Value stored in a command slot for this opcode
    pub fn slot_value(self) -> i32 {
        self.index() + OPCODE_BASE
    }

    pub fn name(self) -> &'static str {
        match self {
            Opcode::Get => "GETx",
            Opcode::Drop => "DROPx",
            Opcode::Goto => "GOTOy",
            Opcode::Destroy | Opcode::Destroy2 => "x->RM0",
            Opcode::Night => "NIGHT",
            Opcode::Day => "DAY",
            Opcode::SetFlag => "SETz",
            Opcode::ClearFlag => "CLRz",
            Opcode::Dead => "DEAD",
            Opcode::PutObject => "x->y",
            Opcode::Finish => "FINI",
            Opcode::Look | Opcode::Look2 => "DspRM",
            Opcode::Score => "SCORE",
            Opcode::Inventory => "INV",
            Opcode::SetFlag0 => "SET0",
            Opcode::ClearFlag0 => "CLR0",
            Opcode::Fill => "FILL",
            Opcode::ClearScreen => "CLS",
            Opcode::Save => "SAVE",
            Opcode::SwapObjects => "EXx,x",
            Opcode::Continue => "CONT",
            Opcode::SuperGet => "AGETx",
            Opcode::PutWith => "BYx<-x",
            Opcode::DecrementCounter => "CT-1",
            Opcode::PrintCounter => "DspCT",
            Opcode::SetCounter => "CT<-n",
            Opcode::SwapRoom0 => "EXRM0",
            Opcode::SwapCounter => "EXm,CT",
            Opcode::AddCounter => "CT+n",
            Opcode::SubtractCounter => "CT-n",
            Opcode::SayNoun => "SAYw",
            Opcode::SayNounLine => "SAYwCR",
            Opcode::NewLine => "SAYCR",
            Opcode::SwapRoom => "EXc,CR",
            Opcode::Delay => "DELAY",
        }
    }

    /// Parameters this opcode pulls from the action's parameter slots, in order
    pub fn params(self) -> &'static [ParamKind] {
        use ParamKind::*;
        match self {
            Opcode::Get | Opcode::Drop | Opcode::Destroy | Opcode::Destroy2 | Opcode::SuperGet => {
                &[Object]
            }
            Opcode::Goto => &[Room],
            Opcode::SetFlag | Opcode::ClearFlag => &[Flag],
            Opcode::PutObject => &[Object, Room],
            Opcode::SwapObjects | Opcode::PutWith => &[Object, Object],
            Opcode::SetCounter | Opcode::AddCounter | Opcode::SubtractCounter => &[Number],
            Opcode::SwapCounter => &[Counter],
            Opcode::SwapRoom => &[RoomRegister],
            _ => &[],
        }
    }
}

/// Meaning of one command slot value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandSlot {
    Nop,
    Message(usize),
    Op(Opcode),
    /// In the opcode range but past the end of the opcode table
    Undefined(i32),
}

impl CommandSlot {
    pub fn classify(value: i32) -> CommandSlot {
        if value == 0 {
            CommandSlot::Nop
        } else if value >= MESSAGE_2_START {
            CommandSlot::Message((value - MESSAGE_1_END + 1) as usize)
        } else if (1..=MESSAGE_1_END).contains(&value) {
            CommandSlot::Message(value as usize)
        } else {
            match Opcode::from_index(value - OPCODE_BASE) {
                Some(op) => CommandSlot::Op(op),
                None => CommandSlot::Undefined(value),
            }
        }
    }
}
