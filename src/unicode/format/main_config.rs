//! Recognizer for the main configuration file.
//!
//! The main file describes how to construct the Unicode mappings for every
//! supported code page: direct byte entries, inheritance from another code
//! page, external per-code-page files, exact duplicates, and the global
//! alias rewrites.
//!
//! Line forms:
//!
//! ```text
//! ALIAS <cp_from> <cp_to> [BIDIRECTIONAL]
//! CODEPAGE <number>
//! CODEPAGE <number> DUPLICATES <number>
//! EXTENDS CODEPAGE <number>
//! EXTENDS FILE <dir> <file>
//! <byte>                          # byte has no character
//! <byte> <cp> [<mark> [<mark>]]   # byte maps to a grapheme
//! ```
//!
//! `ALIAS`, `DUPLICATES` and `EXTENDS` close the current code page scope;
//! a byte entry is only legal inside one.

use super::super::types::error::{MappingError, Result};
use super::super::types::grapheme::Grapheme;
use super::super::types::models::{
    add_if_not_mapped, ConfigAliases, ConfigDuplicates, ConfigMappings,
};
use super::tokens::{
    parse_code_page, parse_grapheme, parse_hex_byte, parse_hex_code_point, tokenize, LineReader,
};

/// Everything the main configuration file defines.
#[derive(Debug, Default)]
pub(crate) struct MainConfig {
    pub mappings: ConfigMappings,
    pub duplicates: ConfigDuplicates,
    pub aliases: ConfigAliases,
}

pub(crate) fn parse(content: &str, file_name: &str) -> Result<MainConfig> {
    let mut config = MainConfig::default();
    let mut reader = LineReader::new(content);
    let mut current_code_page: u16 = 0;
    let mut file_empty = true;

    while let Some(line) = reader.next_line() {
        let tokens = tokenize(line);
        if tokens.is_empty() {
            continue;
        }
        let line_num = reader.line_num();

        match tokens[0] {
            "ALIAS" => {
                if (tokens.len() != 3 && tokens.len() != 4)
                    || (tokens.len() == 4 && tokens[3] != "BIDIRECTIONAL")
                {
                    return Err(MappingError::parse(file_name, line_num, "malformed ALIAS"));
                }
                let (from, to) = match (
                    parse_hex_code_point(tokens[1]),
                    parse_hex_code_point(tokens[2]),
                ) {
                    (Some(from), Some(to)) => (from, to),
                    _ => {
                        return Err(MappingError::parse(
                            file_name,
                            line_num,
                            "malformed ALIAS code point",
                        ))
                    }
                };

                config.aliases.push((from, to));
                if tokens.len() == 4 {
                    config.aliases.push((to, from));
                }
                current_code_page = 0;
            }

            "CODEPAGE" => {
                if tokens.len() == 4 && tokens[2] == "DUPLICATES" {
                    let (code_page, duplicate_of) =
                        match (parse_code_page(tokens[1]), parse_code_page(tokens[3])) {
                            (Some(first), Some(second)) => (first, second),
                            _ => {
                                return Err(MappingError::parse(
                                    file_name,
                                    line_num,
                                    "invalid code page number",
                                ))
                            }
                        };
                    check_not_defined(&config, code_page, file_name, line_num)?;
                    config.duplicates.insert(code_page, duplicate_of);
                    current_code_page = 0;
                } else {
                    let code_page = match tokens.len() {
                        2 => parse_code_page(tokens[1]),
                        _ => None,
                    }
                    .ok_or_else(|| {
                        MappingError::parse(file_name, line_num, "invalid code page number")
                    })?;
                    check_not_defined(&config, code_page, file_name, line_num)?;
                    config.mappings.entry(code_page).or_default().valid = true;
                    current_code_page = code_page;
                }
            }

            "EXTENDS" => {
                if current_code_page == 0 {
                    return Err(MappingError::parse(
                        file_name,
                        line_num,
                        "not currently defining a code page",
                    ));
                }
                let entry = config
                    .mappings
                    .entry(current_code_page)
                    .or_default();

                if tokens.len() == 3 && tokens[1] == "CODEPAGE" {
                    entry.extends_code_page =
                        parse_code_page(tokens[2]).ok_or_else(|| {
                            MappingError::parse(file_name, line_num, "invalid code page number")
                        })?;
                } else if tokens.len() == 4 && tokens[1] == "FILE" {
                    entry.extends_dir = tokens[2].to_string();
                    entry.extends_file = tokens[3].to_string();
                    file_empty = false;
                } else {
                    return Err(MappingError::parse(file_name, line_num, "malformed EXTENDS"));
                }
                current_code_page = 0;
            }

            first => {
                let character_code = parse_hex_byte(first).ok_or_else(|| {
                    MappingError::parse(file_name, line_num, "unrecognized directive")
                })?;
                if current_code_page == 0 {
                    return Err(MappingError::parse(
                        file_name,
                        line_num,
                        "not currently defining a code page",
                    ));
                }
                if tokens.len() > 4 {
                    return Err(MappingError::parse(file_name, line_num, "too many tokens"));
                }

                // 7-bit ASCII codes are fixed; only the high half is
                // configurable.
                if character_code < 0x80 {
                    continue;
                }
                let mapping = &mut config
                    .mappings
                    .entry(current_code_page)
                    .or_default()
                    .mapping;

                if tokens.len() == 1 {
                    // The byte has no character in this code page
                    add_if_not_mapped(mapping, character_code, Grapheme::default());
                } else {
                    let grapheme = parse_grapheme(&tokens).ok_or_else(|| {
                        MappingError::parse(file_name, line_num, "malformed mapping entry")
                    })?;
                    if !grapheme.is_valid() {
                        return Err(MappingError::invalid_grapheme(file_name, line_num));
                    }
                    add_if_not_mapped(mapping, character_code, grapheme);
                }
                file_empty = false;
            }
        }
    }

    if file_empty {
        return Err(MappingError::NoEntries(file_name.to_string()));
    }
    Ok(config)
}

fn check_not_defined(
    config: &MainConfig,
    code_page: u16,
    file_name: &str,
    line_num: usize,
) -> Result<()> {
    let defined = config
        .mappings
        .get(&code_page)
        .is_some_and(|entry| entry.valid)
        || config.duplicates.contains_key(&code_page);
    if defined {
        return Err(MappingError::parse(
            file_name,
            line_num,
            "code page already defined",
        ));
    }
    Ok(())
}
