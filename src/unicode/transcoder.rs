//! The transcoder: configuration registry, code page builder, and the
//! public conversion operations.

use std::collections::{BTreeMap, BTreeSet};

use log::{debug, error, warn};

use super::codec;
use super::convert;
use super::format;
use super::host::HostContext;
use super::types::grapheme::Grapheme;
use super::types::models::{
    add_if_not_mapped, AsciiMapping, CodePageMapping, CodePageTables, CodePoint, ConfigAliases,
    ConfigDuplicates, ConfigMappings, DecompositionRules, DEFAULT_CODE_PAGE,
};

const FILE_NAME_MAIN: &str = "MAIN.TXT";
const FILE_NAME_ASCII: &str = "ASCII.TXT";
const FILE_NAME_DECOMPOSITION: &str = "DECOMPOSITION.TXT";
const DIR_NAME_MAPPING: &str = "mapping";

/// Bidirectional text transcoder between UTF-8 and DOS code pages.
///
/// One value owns every table: the construction recipes from the main
/// configuration file, the lazily built per-code-page lookup tables, and
/// the sets backing once-per-process warnings. Configuration is loaded on
/// the first conversion; preparing a code page reads its external mapping
/// file once and caches the result, including failures.
///
/// Configuration problems never surface as errors here. They are logged
/// and the affected code page degrades to the default one (or to plain
/// 7-bit handling when even the default is unavailable).
pub struct Transcoder<H: HostContext> {
    host: H,
    config_loaded: bool,

    // Construction recipes and global tables from the top-level files
    config_mappings: ConfigMappings,
    config_duplicates: ConfigDuplicates,
    config_aliases: ConfigAliases,
    mapping_ascii: AsciiMapping,
    decomposition_rules: DecompositionRules,

    // Concrete per-code-page tables, built on first request
    pages: BTreeMap<u16, CodePageTables>,
    // Code pages whose construction already ran, successfully or not;
    // stops retries and breaks EXTENDS cycles
    already_tried: BTreeSet<u16>,

    warned_code_points: BTreeSet<CodePoint>,
    warned_code_pages: BTreeSet<u16>,
    warned_default_code_page: bool,
}

impl<H: HostContext> Transcoder<H> {
    /// Creates a transcoder over the given host. No I/O happens until the
    /// first conversion.
    pub fn new(host: H) -> Self {
        Self {
            host,
            config_loaded: false,
            config_mappings: ConfigMappings::new(),
            config_duplicates: ConfigDuplicates::new(),
            config_aliases: ConfigAliases::new(),
            mapping_ascii: AsciiMapping::new(),
            decomposition_rules: DecompositionRules::new(),
            pages: BTreeMap::new(),
            already_tried: BTreeSet::new(),
            warned_code_points: BTreeSet::new(),
            warned_code_pages: BTreeSet::new(),
            warned_default_code_page: false,
        }
    }

    /// Converts UTF-8 text to the currently loaded DOS code page.
    ///
    /// Returns the converted bytes, one per input grapheme, and whether
    /// every grapheme decoded and mapped cleanly. Unmappable positions
    /// become `?`.
    pub fn utf8_to_dos(&mut self, input: &[u8]) -> (Vec<u8>, bool) {
        let code_page = self.utf8_code_page();
        self.convert_to_dos(input, code_page)
    }

    /// Converts UTF-8 text to an explicit DOS code page, falling back to
    /// the default one when that code page is unknown or broken.
    pub fn utf8_to_dos_for_cp(&mut self, input: &[u8], code_page: u16) -> (Vec<u8>, bool) {
        self.load_config_if_needed();
        let code_page = self.resolve_custom_code_page(code_page);
        self.convert_to_dos(input, code_page)
    }

    /// Converts DOS text in the currently loaded code page to UTF-8.
    ///
    /// Always succeeds: bytes without a mapping become `?`, control bytes
    /// expand to their screen glyphs.
    pub fn dos_to_utf8(&mut self, input: &[u8]) -> Vec<u8> {
        let code_page = self.utf8_code_page();
        self.convert_from_dos(input, code_page)
    }

    /// Converts DOS text in an explicit code page to UTF-8.
    pub fn dos_to_utf8_for_cp(&mut self, input: &[u8], code_page: u16) -> Vec<u8> {
        self.load_config_if_needed();
        let code_page = self.resolve_custom_code_page(code_page);
        self.convert_from_dos(input, code_page)
    }

    /// The code page conversions without an explicit argument will use:
    /// the emulator's loaded code page after deduplication, the default
    /// one when that is unsupported or the adapter cannot switch character
    /// sets, or 0 when not even the default could be prepared.
    pub fn utf8_code_page(&mut self) -> u16 {
        self.load_config_if_needed();

        if !self.host.can_switch_character_set() {
            // Below EGA it wasn't possible to change the character set
            return self.default_code_page();
        }

        let code_page = self.deduplicate_code_page(self.host.loaded_code_page());
        if self.prepare_code_page(code_page) {
            return code_page;
        }
        if code_page != 0 {
            self.warn_code_page(code_page);
        }
        self.default_code_page()
    }

    fn convert_to_dos(&mut self, input: &[u8], code_page: u16) -> (Vec<u8>, bool) {
        let (wide, decode_status) = codec::utf8::decode(input);
        let page = self.pages.get(&code_page);
        let (out, map_status) = convert::wide_to_dos(
            &wide,
            page,
            &self.mapping_ascii,
            &self.decomposition_rules,
            &mut self.warned_code_points,
        );
        (out, decode_status && map_status)
    }

    fn convert_from_dos(&self, input: &[u8], code_page: u16) -> Vec<u8> {
        let reverse = self.pages.get(&code_page).map(|page| &page.reverse);
        let wide = convert::dos_to_wide(input, reverse);
        codec::utf8::encode(&wide)
    }

    // ------------------------------------------------------------------
    // Code page resolution
    // ------------------------------------------------------------------

    fn resolve_custom_code_page(&mut self, custom_code_page: u16) -> u16 {
        if custom_code_page == 0 {
            return 0;
        }
        let code_page = self.deduplicate_code_page(custom_code_page);
        if self.prepare_code_page(code_page) {
            return code_page;
        }
        self.warn_code_page(code_page);
        self.default_code_page()
    }

    fn default_code_page(&mut self) -> u16 {
        if self.prepare_code_page(DEFAULT_CODE_PAGE) {
            return DEFAULT_CODE_PAGE;
        }
        if !self.warned_default_code_page {
            self.warned_default_code_page = true;
            warn!("UNICODE: unable to prepare default code page");
        }
        0
    }

    fn deduplicate_code_page(&self, code_page: u16) -> u16 {
        self.config_duplicates
            .get(&code_page)
            .copied()
            .unwrap_or(code_page)
    }

    fn warn_code_page(&mut self, code_page: u16) {
        if self.warned_code_pages.insert(code_page) {
            warn!("UNICODE: requested unknown code page {}", code_page);
        }
    }

    // ------------------------------------------------------------------
    // Configuration load
    // ------------------------------------------------------------------

    fn load_config_if_needed(&mut self) {
        if self.config_loaded {
            return;
        }
        self.config_loaded = true;

        let path_root = self.host.resource_path(DIR_NAME_MAPPING);
        debug!(
            "UNICODE: loading mapping configuration from {}",
            path_root.display()
        );

        match format::read_mapping_file(&path_root, FILE_NAME_DECOMPOSITION)
            .and_then(|content| format::decomposition::parse(&content, FILE_NAME_DECOMPOSITION))
        {
            Ok(rules) => self.decomposition_rules = rules,
            Err(err) => error!("UNICODE: {}", err),
        }

        match format::read_mapping_file(&path_root, FILE_NAME_ASCII)
            .and_then(|content| format::ascii_table::parse(&content, FILE_NAME_ASCII))
        {
            Ok(mapping) => self.mapping_ascii = mapping,
            Err(err) => error!("UNICODE: {}", err),
        }

        match format::read_mapping_file(&path_root, FILE_NAME_MAIN)
            .and_then(|content| format::main_config::parse(&content, FILE_NAME_MAIN))
        {
            Ok(config) => {
                self.config_mappings = config.mappings;
                self.config_duplicates = config.duplicates;
                self.config_aliases = config.aliases;
            }
            Err(err) => error!("UNICODE: {}", err),
        }
    }

    // ------------------------------------------------------------------
    // Code page construction
    // ------------------------------------------------------------------

    fn prepare_code_page(&mut self, code_page: u16) -> bool {
        if self.pages.contains_key(&code_page) {
            return true; // code page already prepared
        }
        if !self.config_mappings.contains_key(&code_page) || !self.construct_mapping(code_page) {
            return false; // unsupported code page or broken definition
        }
        self.construct_aliases(code_page);
        true
    }

    fn construct_mapping(&mut self, code_page: u16) -> bool {
        // A single attempt per code page: a failed construction stays
        // failed, and an EXTENDS cycle bottoms out here.
        if !self.already_tried.insert(code_page) {
            return false;
        }

        let Some(config) = self.config_mappings.get(&code_page).cloned() else {
            return false;
        };

        let mut tables = CodePageTables::default();

        // First apply the entries from the main configuration file
        for (&character_code, grapheme) in &config.mapping {
            add_to_mappings(&mut tables, code_page, character_code, grapheme.clone());
        }

        // If the code page extends another one, copy the remaining entries;
        // existing entries are never overridden
        if config.extends_code_page != 0 {
            let dependency = self.deduplicate_code_page(config.extends_code_page);
            if !self.prepare_code_page(dependency) {
                error!(
                    "UNICODE: code page {} mapping requires code page {} mapping",
                    code_page, dependency
                );
                return false;
            }
            let Some(parent_tables) = self.pages.get(&dependency) else {
                return false;
            };
            let parent: Vec<(u8, Grapheme)> = parent_tables
                .normalized
                .iter()
                .map(|(grapheme, &character_code)| (character_code, grapheme.clone()))
                .collect();
            for (character_code, grapheme) in parent {
                add_to_mappings(&mut tables, code_page, character_code, grapheme);
            }
        }

        // If the code page uses an external mapping file, merge its entries
        if !config.extends_file.is_empty() {
            let path_root = self.host.resource_path(&config.extends_dir);
            let loaded = format::read_mapping_file(&path_root, &config.extends_file)
                .and_then(|content| {
                    format::codepage_file::parse(&content, &config.extends_file)
                });
            match loaded {
                Ok(mapping) => {
                    for (character_code, grapheme) in mapping {
                        add_to_mappings(&mut tables, code_page, character_code, grapheme);
                    }
                }
                Err(err) => {
                    error!("UNICODE: {}", err);
                    return false;
                }
            }
        }

        tables.decomposed = construct_decomposed(&tables.normalized, &self.decomposition_rules);

        debug!(
            "UNICODE: prepared code page {} ({} mappings)",
            code_page,
            tables.normalized.len()
        );
        self.pages.insert(code_page, tables);
        true
    }

    /// Materializes the global alias rewrites against one code page: an
    /// alias applies when its source is not covered but its target is.
    /// Declaration order decides between competing aliases.
    fn construct_aliases(&mut self, code_page: u16) {
        let Some(tables) = self.pages.get_mut(&code_page) else {
            return;
        };

        for &(from, to) in &self.config_aliases {
            let from_grapheme = Grapheme::new(from);
            if tables.normalized.contains_key(&from_grapheme)
                || tables.aliases_normalized.contains_key(&from_grapheme)
            {
                continue;
            }
            if let Some(&character_code) = tables.normalized.get(&Grapheme::new(to)) {
                tables.aliases_normalized.insert(from_grapheme, character_code);
            }
        }

        tables.aliases_decomposed =
            construct_decomposed(&tables.aliases_normalized, &self.decomposition_rules);
    }
}

/// Adds one byte/grapheme pair to a code page's tables, first writer wins
/// in both directions. 7-bit codes are ignored; an empty or invalid
/// grapheme claims only the reverse slot, so the byte decodes to nothing
/// meaningful but cannot be redefined later.
fn add_to_mappings(
    tables: &mut CodePageTables,
    code_page: u16,
    character_code: u8,
    grapheme: Grapheme,
) {
    if character_code < 0x80 {
        return;
    }
    if !add_if_not_mapped(&mut tables.reverse, character_code, grapheme.clone()) {
        return;
    }
    if grapheme.is_empty() || !grapheme.is_valid() {
        return;
    }
    if add_if_not_mapped(&mut tables.normalized, grapheme, character_code) {
        return;
    }
    warn!(
        "UNICODE: mapping for code page {} uses a code point twice; character {:#04x}",
        code_page, character_code
    );
}

/// Derives the decomposed lookup table: every grapheme whose decomposition
/// differs from its loaded form gets a decomposed entry for the same byte.
fn construct_decomposed(
    normalized: &CodePageMapping,
    rules: &DecompositionRules,
) -> CodePageMapping {
    let mut decomposed = CodePageMapping::new();
    for (grapheme, &character_code) in normalized {
        let mut tmp = grapheme.clone();
        tmp.decompose(rules);
        if &tmp == grapheme {
            continue;
        }
        decomposed.insert(tmp, character_code);
    }
    decomposed
}
