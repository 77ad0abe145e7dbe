//! Prompt domain - grounded prompt construction

mod template;

pub use template::{
    render_rag_prompt, PromptTemplate, PromptVariable, TemplateError, RAG_PROMPT_TEMPLATE,
};
