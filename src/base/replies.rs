//! Fixed reply texts sent back to the chat.

/// Sent when `!criarevento` has fewer than three `|`-separated parts.
pub const CREATE_USAGE: &str = "Use o comando assim: !criarevento Titulo | Descrição | Data";

/// Sent when the date of `!criarevento` is not a valid `DD/MM/YYYY` calendar date.
pub const INVALID_DATE: &str = "Data inválida. Use o formato: DD/MM/YYYY";

/// Sent when the store fails to persist a new event.
pub const CREATE_FAILED: &str = "Erro ao criar o evento!";

/// Sent when `!verificar` is not followed by an integer.
pub const INVALID_ID: &str = "Por favor, forneça um ID válido: Ex: \"!verificar 1\"";

/// Sent when the store fails to look up an event.
pub const LOOKUP_FAILED: &str = "Erro ao buscar o evento!";

/// Shown in place of a missing description.
pub const NO_DESCRIPTION: &str = "Sem descrição";

/// Sent by `!lista` when there are no events.
pub const NO_EVENTS: &str = "Não existe nada no momento";

/// Sent when the store fails to list events.
pub const LIST_FAILED: &str = "Erro ao listar os eventos!";

/// Header line of the `!lista` reply.
pub const LIST_HEADER: &str = "📋 *Eventos cadastrados:*";
