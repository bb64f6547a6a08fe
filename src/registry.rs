//! Fixed table of comparison tasks and the metric each one is scored with.

use std::fmt;

/// Programming language of a code-response task.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Language {
    Python,
    Java,
    Cpp,
    JavaScript,
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Language::Python => "python",
            Language::Java => "java",
            Language::Cpp => "cpp",
            Language::JavaScript => "javascript",
        };
        f.write_str(name)
    }
}

/// How a task's response pair is scored.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Metric {
    /// Sentence-level BLEU on the raw text.
    TextBleu,
    /// CodeBLEU with the given grammar.
    CodeBleu(Language),
}

/// Every task file the corpora must contain, in report order.
///
/// Text-scored tasks first (prose answers, plus SQL and Kotlin which have
/// no CodeBLEU grammar), then code tasks grouped by language.
/// `LinkedListNodeDeletionC.json` is plain C but close enough to parse
/// with the C++ grammar, so it is scored as C++.
pub const TASKS: &[(&str, Metric)] = &[
    ("BugClassificationC++.json", Metric::TextBleu),
    ("CodeSummarizationJava.json", Metric::TextBleu),
    ("FunctionSummarizationPython.json", Metric::TextBleu),
    ("NullDereferenceDetectionJava.json", Metric::TextBleu),
    ("PromptfromCodeCommentsPython.json", Metric::TextBleu),
    ("SummaryDecompositionC++.json", Metric::TextBleu),
    ("SQLSchemaDesignSQL.json", Metric::TextBleu),
    ("DataClasstoAPIConversionKotlin.json", Metric::TextBleu),
    ("BugFixingPython-Off-by-One.json", Metric::CodeBleu(Language::Python)),
    ("ConstructorCompletionPython.json", Metric::CodeBleu(Language::Python)),
    ("CSVParserVariantsPython.json", Metric::CodeBleu(Language::Python)),
    ("FixingFactorialBugPython.json", Metric::CodeBleu(Language::Python)),
    ("GeneratingEmailValidatorsPython+Regex.json", Metric::CodeBleu(Language::Python)),
    ("GeneratingFlaskAPIsPython.json", Metric::CodeBleu(Language::Python)),
    ("PurposeInferenceCompletionPython.json", Metric::CodeBleu(Language::Python)),
    ("RecursiveFunctionCompletionPython.json", Metric::CodeBleu(Language::Python)),
    ("BinarySearchCompletionJava.json", Metric::CodeBleu(Language::Java)),
    ("Self-ConsistencyBugFixingC++.json", Metric::CodeBleu(Language::Cpp)),
    ("LinkedListNodeDeletionC.json", Metric::CodeBleu(Language::Cpp)),
    ("PromptChainingBugIdentificationFixJavaScript.json", Metric::CodeBleu(Language::JavaScript)),
];
