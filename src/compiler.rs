//! Single-pass compiler: source text → bytecode
//!
//! Parsing and code generation are fused; there is no AST. A Pratt rule
//! table maps each token kind to an optional prefix action, an optional
//! infix action and a binding precedence, and `parse_precedence` climbs
//! them to emit instructions in evaluation order.

use crate::chunk::{Chunk, OpCode, MAX_CONSTANTS};
use crate::object::Heap;
use crate::scanner::Scanner;
use crate::token::{Token, TokenKind};
use crate::value::Value;

/// Operator binding precedences, weakest first
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Precedence {
    None,
    Assignment, // =
    Or,         // or
    And,        // and
    Equality,   // == !=
    Comparison, // < > <= >=
    Term,       // + -
    Factor,     // * /
    Unary,      // ! -
    Call,       // . ()
    Primary,
}

impl Precedence {
    /// One binding level tighter. Parsing the right operand at this level
    /// is what makes same-precedence chains left-associative.
    fn next(self) -> Precedence {
        match self {
            Precedence::None => Precedence::Assignment,
            Precedence::Assignment => Precedence::Or,
            Precedence::Or => Precedence::And,
            Precedence::And => Precedence::Equality,
            Precedence::Equality => Precedence::Comparison,
            Precedence::Comparison => Precedence::Term,
            Precedence::Term => Precedence::Factor,
            Precedence::Factor => Precedence::Unary,
            Precedence::Unary => Precedence::Call,
            Precedence::Call => Precedence::Primary,
            Precedence::Primary => Precedence::Primary,
        }
    }
}

type ParseFn<'src, 'ctx> = fn(&mut Compiler<'src, 'ctx>);

/// One row of the Pratt table
struct ParseRule<'src, 'ctx> {
    prefix: Option<ParseFn<'src, 'ctx>>,
    infix: Option<ParseFn<'src, 'ctx>>,
    precedence: Precedence,
}

impl<'src, 'ctx> ParseRule<'src, 'ctx> {
    fn new(
        prefix: Option<ParseFn<'src, 'ctx>>,
        infix: Option<ParseFn<'src, 'ctx>>,
        precedence: Precedence,
    ) -> Self {
        Self {
            prefix,
            infix,
            precedence,
        }
    }
}

/// Look up the parse rule for a token kind. Tokens without a row here
/// cannot start or continue an expression.
fn rule<'src, 'ctx>(kind: TokenKind) -> ParseRule<'src, 'ctx> {
    match kind {
        TokenKind::LeftParen => {
            ParseRule::new(Some(Compiler::grouping), None, Precedence::None)
        }
        TokenKind::Minus => {
            ParseRule::new(Some(Compiler::unary), Some(Compiler::binary), Precedence::Term)
        }
        TokenKind::Plus => ParseRule::new(None, Some(Compiler::binary), Precedence::Term),
        TokenKind::Slash | TokenKind::Star => {
            ParseRule::new(None, Some(Compiler::binary), Precedence::Factor)
        }
        TokenKind::Bang => ParseRule::new(Some(Compiler::unary), None, Precedence::None),
        TokenKind::BangEqual | TokenKind::EqualEqual => {
            ParseRule::new(None, Some(Compiler::binary), Precedence::Equality)
        }
        TokenKind::Greater
        | TokenKind::GreaterEqual
        | TokenKind::Less
        | TokenKind::LessEqual => {
            ParseRule::new(None, Some(Compiler::binary), Precedence::Comparison)
        }
        TokenKind::Number => ParseRule::new(Some(Compiler::number), None, Precedence::None),
        TokenKind::String => ParseRule::new(Some(Compiler::string), None, Precedence::None),
        TokenKind::Nil | TokenKind::True | TokenKind::False => {
            ParseRule::new(Some(Compiler::literal), None, Precedence::None)
        }
        _ => ParseRule::new(None, None, Precedence::None),
    }
}

/// Compiler state: the scanner it drives, the chunk and heap it emits
/// into, and the two-token parse window with its error flags.
pub struct Compiler<'src, 'ctx> {
    scanner: Scanner<'src>,
    chunk: &'ctx mut Chunk,
    heap: &'ctx mut Heap,
    previous: Token<'src>,
    current: Token<'src>,
    had_error: bool,
    panic_mode: bool,
}

/// Compile one expression into `chunk`, allocating string constants into
/// `heap`. Returns false when any diagnostic was reported; the chunk's
/// contents are unspecified in that case and must not be executed.
pub fn compile(source: &str, chunk: &mut Chunk, heap: &mut Heap) -> bool {
    let mut compiler = Compiler::new(source, chunk, heap);
    compiler.advance();
    compiler.expression();
    compiler.consume(TokenKind::Eof, "expect end of expression");
    compiler.emit(OpCode::Return);
    !compiler.had_error
}

impl<'src, 'ctx> Compiler<'src, 'ctx> {
    fn new(source: &'src str, chunk: &'ctx mut Chunk, heap: &'ctx mut Heap) -> Self {
        // Both window slots are overwritten before they are ever read
        let placeholder = Token::new(TokenKind::Eof, "", 1);
        Self {
            scanner: Scanner::new(source),
            chunk,
            heap,
            previous: placeholder,
            current: placeholder,
            had_error: false,
            panic_mode: false,
        }
    }

    // ==================== Token flow ====================

    /// Pull the next real token, reporting any error tokens on the way
    fn advance(&mut self) {
        self.previous = self.current;
        loop {
            self.current = self.scanner.scan_token();
            if self.current.kind != TokenKind::Error {
                break;
            }
            let message = self.current.lexeme;
            self.error_at_current(message);
        }
    }

    /// Advance only if the current token has the expected kind
    fn consume(&mut self, kind: TokenKind, message: &str) {
        if self.current.kind == kind {
            self.advance();
            return;
        }
        self.error_at_current(message);
    }

    // ==================== Error reporting ====================

    fn error_at_current(&mut self, message: &str) {
        let token = self.current;
        self.error_at(&token, message);
    }

    fn error(&mut self, message: &str) {
        let token = self.previous;
        self.error_at(&token, message);
    }

    /// Report one diagnostic and enter panic mode. While panicking, all
    /// further reports are swallowed; in this expression-only grammar
    /// there is no synchronization point, so panic mode stays set for the
    /// rest of the compile.
    fn error_at(&mut self, token: &Token<'src>, message: &str) {
        if self.panic_mode {
            return;
        }
        self.panic_mode = true;

        match token.kind {
            TokenKind::Eof => eprintln!("[line {}] Error at end: {}", token.line, message),
            // The lexeme of an error token is the scanner's message, not
            // source text
            TokenKind::Error => eprintln!("[line {}] Error: {}", token.line, message),
            _ => eprintln!(
                "[line {}] Error at '{}': {}",
                token.line, token.lexeme, message
            ),
        }

        self.had_error = true;
    }

    // ==================== Emission ====================

    fn emit(&mut self, op: OpCode) {
        self.chunk.write(op, self.previous.line);
    }

    fn emit_byte(&mut self, byte: u8) {
        self.chunk.write_byte(byte, self.previous.line);
    }

    fn emit_constant(&mut self, value: Value) {
        let idx = self.make_constant(value);
        self.emit(OpCode::Constant);
        self.emit_byte(idx);
    }

    /// Add to the constant pool, checking the one-byte operand cap
    fn make_constant(&mut self, value: Value) -> u8 {
        if self.chunk.constants.len() >= MAX_CONSTANTS {
            self.error("too many constants in one chunk");
            return 0;
        }
        self.chunk.add_constant(value) as u8
    }

    // ==================== Parsing ====================

    fn expression(&mut self) {
        self.parse_precedence(Precedence::Assignment);
    }

    /// Parse anything at `precedence` or tighter: one prefix expression,
    /// then every infix operator whose binding is at least as strong.
    fn parse_precedence(&mut self, precedence: Precedence) {
        self.advance();

        let Some(prefix) = rule(self.previous.kind).prefix else {
            // The sole "expected expression" error path
            self.error("expect expression");
            return;
        };
        prefix(self);

        while precedence <= rule(self.current.kind).precedence {
            self.advance();
            if let Some(infix) = rule(self.previous.kind).infix {
                infix(self);
            }
        }
    }

    fn grouping(&mut self) {
        self.expression();
        self.consume(TokenKind::RightParen, "expect ')' after expression");
    }

    fn number(&mut self) {
        match self.previous.lexeme.parse::<f64>() {
            Ok(value) => self.emit_constant(Value::Number(value)),
            Err(_) => self.error("invalid number literal"),
        }
    }

    /// A string literal: strip the quotes and allocate the contents on
    /// the heap. Ownership goes to the VM's object table immediately, so
    /// the constant outlives the chunk that references it.
    fn string(&mut self) {
        let lexeme = self.previous.lexeme;
        let contents = &lexeme[1..lexeme.len() - 1];
        let handle = self.heap.alloc_string(contents.to_string());
        self.emit_constant(Value::Obj(handle));
    }

    fn literal(&mut self) {
        match self.previous.kind {
            TokenKind::Nil => self.emit(OpCode::Nil),
            TokenKind::True => self.emit(OpCode::True),
            TokenKind::False => self.emit(OpCode::False),
            _ => {}
        }
    }

    fn unary(&mut self) {
        let op_kind = self.previous.kind;

        // Operand first; the instruction acts on the value it leaves
        self.parse_precedence(Precedence::Unary);

        match op_kind {
            TokenKind::Minus => self.emit(OpCode::Negate),
            TokenKind::Bang => self.emit(OpCode::Not),
            _ => {}
        }
    }

    /// An infix operator. The right operand binds one level tighter than
    /// the operator itself. `!=`, `<=` and `>=` have no opcodes of their
    /// own and compile to the complementary comparison plus Not.
    fn binary(&mut self) {
        let op_kind = self.previous.kind;
        let precedence = rule(op_kind).precedence;
        self.parse_precedence(precedence.next());

        match op_kind {
            TokenKind::Plus => self.emit(OpCode::Add),
            TokenKind::Minus => self.emit(OpCode::Subtract),
            TokenKind::Star => self.emit(OpCode::Multiply),
            TokenKind::Slash => self.emit(OpCode::Divide),
            TokenKind::EqualEqual => self.emit(OpCode::Equal),
            TokenKind::BangEqual => {
                self.emit(OpCode::Equal);
                self.emit(OpCode::Not);
            }
            TokenKind::Greater => self.emit(OpCode::Greater),
            TokenKind::GreaterEqual => {
                self.emit(OpCode::Less);
                self.emit(OpCode::Not);
            }
            TokenKind::Less => self.emit(OpCode::Less),
            TokenKind::LessEqual => {
                self.emit(OpCode::Greater);
                self.emit(OpCode::Not);
            }
            _ => {}
        }
    }
}
