//! Token kinds.
//!
//! A closed enumeration of every token the scanner can produce. Keyword
//! variants carry a `Kw` prefix; the rest are named after what they denote.
//! [`TokenKind::name`] gives the grammar name a parser expects (`kIF_MOD`,
//! `tSTRING_BEG`, ...).

use std::fmt;

#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TokenKind {
    // === Keywords ===
    KwEncoding,
    KwFile,
    KwLine,
    KwAlias,
    KwAnd,
    KwBegin,
    KwLBegin,
    KwBreak,
    KwCase,
    KwClass,
    KwDef,
    KwDefined,
    KwDo,
    KwDoBlock,
    KwDoCond,
    KwDoLambda,
    KwElse,
    KwElsif,
    KwEnd,
    KwLEnd,
    KwEnsure,
    KwFalse,
    KwFor,
    KwIf,
    KwIfMod,
    KwIn,
    KwModule,
    KwNext,
    KwNil,
    KwNot,
    KwOr,
    KwRedo,
    KwRescue,
    KwRescueMod,
    KwRetry,
    KwReturn,
    KwSelf,
    KwSuper,
    KwThen,
    KwTrue,
    KwUndef,
    KwUnless,
    KwUnlessMod,
    KwUntil,
    KwUntilMod,
    KwWhen,
    KwWhile,
    KwWhileMod,
    KwYield,

    // === Punctuation, names and literals ===
    /// `&` as block-pass prefix
    Amper,
    /// binary `&`
    Amper2,
    /// `&.`
    AndDot,
    /// `&&`
    AndOp,
    /// `[]` as a method name
    Aref,
    /// `[]=` as a method name
    Aset,
    /// `=>`
    Assoc,
    /// `$&`, `$'`, `$+`, `` $` ``
    BackRef,
    /// backtick as a method name
    BackRef2,
    /// `!`
    Bang,
    /// `^`
    Caret,
    /// `?a`
    Character,
    /// `<=>`
    Cmp,
    /// `:`
    Colon,
    /// `::` after a value
    Colon2,
    /// leading `::`
    Colon3,
    Comma,
    Comment,
    Constant,
    /// `@@name`
    Cvar,
    Divide,
    Dot,
    /// `..`
    Dot2,
    /// `...`
    Dot3,
    /// `**` as double-splat prefix
    Dstar,
    /// `?` in a ternary
    Eh,
    /// `==`
    Eq,
    /// `=`
    Eql,
    /// `===`
    Eqq,
    /// `name?` / `name!`
    Fid,
    Float,
    Geq,
    Gt,
    Gvar,
    Identifier,
    Imaginary,
    Integer,
    Ivar,
    /// `name:`
    Label,
    /// closing quote of `"name":`
    LabelEnd,
    /// `->`
    Lambda,
    /// `{` opening a lambda body
    Lambeg,
    /// `{` opening a hash
    Lbrace,
    /// `{` block after a parenthesized argument
    LbraceArg,
    /// `[` opening an array
    Lbrack,
    /// `[` indexing
    Lbrack2,
    /// `{` opening a block
    Lcurly,
    Leq,
    /// `(` at expression start
    Lparen,
    /// `(` after a space in argument position
    LparenArg,
    /// `(` of a call
    Lparen2,
    Lshft,
    Lt,
    /// `=~`
    Match,
    Minus,
    Neq,
    /// significant newline
    Nl,
    /// `!~`
    Nmatch,
    /// `$1`
    NthRef,
    /// `+=`, `||=`, ...
    OpAsgn,
    /// `||`
    OrOp,
    Percent,
    Pipe,
    Plus,
    Pow,
    /// `%w(`
    QwordsBeg,
    /// `%i(`
    QsymbolsBeg,
    Rational,
    Rbrack,
    Rcurly,
    RegexpBeg,
    RegexpOpt,
    Rparen,
    Rshft,
    Semi,
    /// word separator inside word arrays
    Space,
    /// `*` as splat prefix
    Star,
    /// binary `*`
    Star2,
    /// complete single-token string
    String,
    StringBeg,
    StringContent,
    /// `#{`
    StringDbeg,
    /// closing `}` of an interpolation
    StringDend,
    /// `#` before `@ivar`, `$gvar`, `@@cvar`
    StringDvar,
    StringEnd,
    /// `:"` or `%s(`
    Symbeg,
    Symbol,
    /// `%I(`
    SymbolsBeg,
    Tilde,
    Uminus,
    /// sign glued to a numeric literal
    UnaryNum,
    Uplus,
    /// `%W(`
    WordsBeg,
    XstringBeg,
}

impl TokenKind {
    /// Grammar name of this kind, as used by the downstream parser.
    pub const fn name(self) -> &'static str {
        match self {
            TokenKind::KwEncoding => "k__ENCODING__",
            TokenKind::KwFile => "k__FILE__",
            TokenKind::KwLine => "k__LINE__",
            TokenKind::KwAlias => "kALIAS",
            TokenKind::KwAnd => "kAND",
            TokenKind::KwBegin => "kBEGIN",
            TokenKind::KwLBegin => "klBEGIN",
            TokenKind::KwBreak => "kBREAK",
            TokenKind::KwCase => "kCASE",
            TokenKind::KwClass => "kCLASS",
            TokenKind::KwDef => "kDEF",
            TokenKind::KwDefined => "kDEFINED",
            TokenKind::KwDo => "kDO",
            TokenKind::KwDoBlock => "kDO_BLOCK",
            TokenKind::KwDoCond => "kDO_COND",
            TokenKind::KwDoLambda => "kDO_LAMBDA",
            TokenKind::KwElse => "kELSE",
            TokenKind::KwElsif => "kELSIF",
            TokenKind::KwEnd => "kEND",
            TokenKind::KwLEnd => "klEND",
            TokenKind::KwEnsure => "kENSURE",
            TokenKind::KwFalse => "kFALSE",
            TokenKind::KwFor => "kFOR",
            TokenKind::KwIf => "kIF",
            TokenKind::KwIfMod => "kIF_MOD",
            TokenKind::KwIn => "kIN",
            TokenKind::KwModule => "kMODULE",
            TokenKind::KwNext => "kNEXT",
            TokenKind::KwNil => "kNIL",
            TokenKind::KwNot => "kNOT",
            TokenKind::KwOr => "kOR",
            TokenKind::KwRedo => "kREDO",
            TokenKind::KwRescue => "kRESCUE",
            TokenKind::KwRescueMod => "kRESCUE_MOD",
            TokenKind::KwRetry => "kRETRY",
            TokenKind::KwReturn => "kRETURN",
            TokenKind::KwSelf => "kSELF",
            TokenKind::KwSuper => "kSUPER",
            TokenKind::KwThen => "kTHEN",
            TokenKind::KwTrue => "kTRUE",
            TokenKind::KwUndef => "kUNDEF",
            TokenKind::KwUnless => "kUNLESS",
            TokenKind::KwUnlessMod => "kUNLESS_MOD",
            TokenKind::KwUntil => "kUNTIL",
            TokenKind::KwUntilMod => "kUNTIL_MOD",
            TokenKind::KwWhen => "kWHEN",
            TokenKind::KwWhile => "kWHILE",
            TokenKind::KwWhileMod => "kWHILE_MOD",
            TokenKind::KwYield => "kYIELD",
            TokenKind::Amper => "tAMPER",
            TokenKind::Amper2 => "tAMPER2",
            TokenKind::AndDot => "tANDDOT",
            TokenKind::AndOp => "tANDOP",
            TokenKind::Aref => "tAREF",
            TokenKind::Aset => "tASET",
            TokenKind::Assoc => "tASSOC",
            TokenKind::BackRef => "tBACK_REF",
            TokenKind::BackRef2 => "tBACK_REF2",
            TokenKind::Bang => "tBANG",
            TokenKind::Caret => "tCARET",
            TokenKind::Character => "tCHARACTER",
            TokenKind::Cmp => "tCMP",
            TokenKind::Colon => "tCOLON",
            TokenKind::Colon2 => "tCOLON2",
            TokenKind::Colon3 => "tCOLON3",
            TokenKind::Comma => "tCOMMA",
            TokenKind::Comment => "tCOMMENT",
            TokenKind::Constant => "tCONSTANT",
            TokenKind::Cvar => "tCVAR",
            TokenKind::Divide => "tDIVIDE",
            TokenKind::Dot => "tDOT",
            TokenKind::Dot2 => "tDOT2",
            TokenKind::Dot3 => "tDOT3",
            TokenKind::Dstar => "tDSTAR",
            TokenKind::Eh => "tEH",
            TokenKind::Eq => "tEQ",
            TokenKind::Eql => "tEQL",
            TokenKind::Eqq => "tEQQ",
            TokenKind::Fid => "tFID",
            TokenKind::Float => "tFLOAT",
            TokenKind::Geq => "tGEQ",
            TokenKind::Gt => "tGT",
            TokenKind::Gvar => "tGVAR",
            TokenKind::Identifier => "tIDENTIFIER",
            TokenKind::Imaginary => "tIMAGINARY",
            TokenKind::Integer => "tINTEGER",
            TokenKind::Ivar => "tIVAR",
            TokenKind::Label => "tLABEL",
            TokenKind::LabelEnd => "tLABEL_END",
            TokenKind::Lambda => "tLAMBDA",
            TokenKind::Lambeg => "tLAMBEG",
            TokenKind::Lbrace => "tLBRACE",
            TokenKind::LbraceArg => "tLBRACE_ARG",
            TokenKind::Lbrack => "tLBRACK",
            TokenKind::Lbrack2 => "tLBRACK2",
            TokenKind::Lcurly => "tLCURLY",
            TokenKind::Leq => "tLEQ",
            TokenKind::Lparen => "tLPAREN",
            TokenKind::LparenArg => "tLPAREN_ARG",
            TokenKind::Lparen2 => "tLPAREN2",
            TokenKind::Lshft => "tLSHFT",
            TokenKind::Lt => "tLT",
            TokenKind::Match => "tMATCH",
            TokenKind::Minus => "tMINUS",
            TokenKind::Neq => "tNEQ",
            TokenKind::Nl => "tNL",
            TokenKind::Nmatch => "tNMATCH",
            TokenKind::NthRef => "tNTH_REF",
            TokenKind::OpAsgn => "tOP_ASGN",
            TokenKind::OrOp => "tOROP",
            TokenKind::Percent => "tPERCENT",
            TokenKind::Pipe => "tPIPE",
            TokenKind::Plus => "tPLUS",
            TokenKind::Pow => "tPOW",
            TokenKind::QwordsBeg => "tQWORDS_BEG",
            TokenKind::QsymbolsBeg => "tQSYMBOLS_BEG",
            TokenKind::Rational => "tRATIONAL",
            TokenKind::Rbrack => "tRBRACK",
            TokenKind::Rcurly => "tRCURLY",
            TokenKind::RegexpBeg => "tREGEXP_BEG",
            TokenKind::RegexpOpt => "tREGEXP_OPT",
            TokenKind::Rparen => "tRPAREN",
            TokenKind::Rshft => "tRSHFT",
            TokenKind::Semi => "tSEMI",
            TokenKind::Space => "tSPACE",
            TokenKind::Star => "tSTAR",
            TokenKind::Star2 => "tSTAR2",
            TokenKind::String => "tSTRING",
            TokenKind::StringBeg => "tSTRING_BEG",
            TokenKind::StringContent => "tSTRING_CONTENT",
            TokenKind::StringDbeg => "tSTRING_DBEG",
            TokenKind::StringDend => "tSTRING_DEND",
            TokenKind::StringDvar => "tSTRING_DVAR",
            TokenKind::StringEnd => "tSTRING_END",
            TokenKind::Symbeg => "tSYMBEG",
            TokenKind::Symbol => "tSYMBOL",
            TokenKind::SymbolsBeg => "tSYMBOLS_BEG",
            TokenKind::Tilde => "tTILDE",
            TokenKind::Uminus => "tUMINUS",
            TokenKind::UnaryNum => "tUNARY_NUM",
            TokenKind::Uplus => "tUPLUS",
            TokenKind::WordsBeg => "tWORDS_BEG",
            TokenKind::XstringBeg => "tXSTRING_BEG",
        }
    }

    /// Whether this is a reserved-word token.
    pub const fn is_keyword(self) -> bool {
        matches!(
            self,
            TokenKind::KwEncoding
                | TokenKind::KwFile
                | TokenKind::KwLine
                | TokenKind::KwAlias
                | TokenKind::KwAnd
                | TokenKind::KwBegin
                | TokenKind::KwLBegin
                | TokenKind::KwBreak
                | TokenKind::KwCase
                | TokenKind::KwClass
                | TokenKind::KwDef
                | TokenKind::KwDefined
                | TokenKind::KwDo
                | TokenKind::KwDoBlock
                | TokenKind::KwDoCond
                | TokenKind::KwDoLambda
                | TokenKind::KwElse
                | TokenKind::KwElsif
                | TokenKind::KwEnd
                | TokenKind::KwLEnd
                | TokenKind::KwEnsure
                | TokenKind::KwFalse
                | TokenKind::KwFor
                | TokenKind::KwIf
                | TokenKind::KwIfMod
                | TokenKind::KwIn
                | TokenKind::KwModule
                | TokenKind::KwNext
                | TokenKind::KwNil
                | TokenKind::KwNot
                | TokenKind::KwOr
                | TokenKind::KwRedo
                | TokenKind::KwRescue
                | TokenKind::KwRescueMod
                | TokenKind::KwRetry
                | TokenKind::KwReturn
                | TokenKind::KwSelf
                | TokenKind::KwSuper
                | TokenKind::KwThen
                | TokenKind::KwTrue
                | TokenKind::KwUndef
                | TokenKind::KwUnless
                | TokenKind::KwUnlessMod
                | TokenKind::KwUntil
                | TokenKind::KwUntilMod
                | TokenKind::KwWhen
                | TokenKind::KwWhile
                | TokenKind::KwWhileMod
                | TokenKind::KwYield
        )
    }

    /// Whether this kind opens a literal whose body follows as separate tokens.
    pub const fn opens_literal(self) -> bool {
        matches!(
            self,
            TokenKind::StringBeg
                | TokenKind::XstringBeg
                | TokenKind::Symbeg
                | TokenKind::RegexpBeg
                | TokenKind::WordsBeg
                | TokenKind::QwordsBeg
                | TokenKind::SymbolsBeg
                | TokenKind::QsymbolsBeg
        )
    }

    /// Numeric literal kinds.
    pub const fn is_numeric(self) -> bool {
        matches!(
            self,
            TokenKind::Integer
                | TokenKind::Float
                | TokenKind::Rational
                | TokenKind::Imaginary
        )
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
