use crate::core::dates::MonthLocale;

const WIKI_PT: &str = "\
Filtros utilizados para extrair a base de dados:
  - Unidade: igual a \"CSF\".
  - Papel do criador: igual a \"Assistente CSF\", \"Assistente CSF CM\", \"Assistente CSF Ajuda Quality\".
  - Origem do caso: igual a \"WhatsApp\".
  - Categoria: diferente de \"Atendimento\".
  - Assunto: não contém \"Atendimento\".
  - Assunto: não contém \"Ativo\".
  - Categorização: não contém \"Ativo\".
  - Motivo: não contém \"Ativo\".

Indicadores:
  - Porcentagem de Variação: variação entre o primeiro e o último período selecionado,
    indicando a diferença percentual no volume de atendimentos.
  - Menor Volume de Atendimentos: menor volume mensal registrado no período selecionado.
  - Maior Volume de Atendimentos: maior volume mensal registrado no período selecionado.
";

const WIKI_EN: &str = "\
Filters used to extract the dataset:
  - Unit: equals \"CSF\".
  - Creator role: equals \"Assistente CSF\", \"Assistente CSF CM\", \"Assistente CSF Ajuda Quality\".
  - Case origin: equals \"WhatsApp\".
  - Category: not \"Atendimento\".
  - Subject: does not contain \"Atendimento\".
  - Subject: does not contain \"Ativo\".
  - Categorization: does not contain \"Ativo\".
  - Reason: does not contain \"Ativo\".

Indicators:
  - Percent Variation: change between the first and the last month of the selected period,
    as a percentage of the first month's case volume.
  - Lowest Monthly Volume: smallest monthly case count in the selected period.
  - Highest Monthly Volume: largest monthly case count in the selected period.
";

pub fn wiki_text(locale: &MonthLocale) -> &'static str {
    match locale.code() {
        "pt" => WIKI_PT,
        _ => WIKI_EN,
    }
}
