use crate::domain::chat::ChatRequest;
use crate::domain::recommendation::RecommendationRequest;

/// A (system, user) message pair, in submission order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptPair {
    pub system: String,
    pub user: String,
}

pub fn chat_system_prompt() -> String {
    [
        "Você é um assistente financeiro especializado em investimentos brasileiros.",
        "Responda sempre em português do Brasil, de forma clara e objetiva.",
        "Ajude com planejamento financeiro, orçamento, reserva de emergência e investimentos",
        "(renda fixa, Tesouro Direto, CDBs, fundos, ações, FIIs e investimentos no exterior).",
        "Não faça promessas de rentabilidade e lembre o usuário de considerar seu perfil de risco.",
    ]
    .join("\n")
}

pub fn recommendation_system_prompt() -> String {
    [
        "Você é um consultor de investimentos especializado no mercado brasileiro e internacional.",
        "Retorne APENAS um objeto JSON válido, sem markdown e sem chaves adicionais.",
        "Formato obrigatório:",
        "{",
        "  \"nationalInvestments\": [",
        "    {",
        "      \"name\": \"Tesouro Selic\",",
        "      \"type\": \"Renda fixa\",",
        "      \"allocation\": 30,",
        "      \"expectedReturn\": \"100% da Selic\",",
        "      \"risk\": \"Baixo\",",
        "      \"description\": \"Reserva de emergência com liquidez diária\"",
        "    }",
        "  ],",
        "  \"internationalInvestments\": [ /* mesmo formato */ ],",
        "  \"summary\": \"resumo da estratégia\",",
        "  \"warnings\": [\"aviso 1\", \"aviso 2\"]",
        "}",
        "Regras:",
        "- allocation é o percentual do valor disponível para investir; a soma deve ser 100",
        "- as recomendações devem respeitar o perfil de investidor e a idade informados",
        "- warnings deve conter os riscos e cuidados relevantes",
    ]
    .join("\n")
}

pub fn chat_prompt(req: &ChatRequest) -> PromptPair {
    PromptPair {
        system: chat_system_prompt(),
        user: req.message.clone(),
    }
}

pub fn recommendation_prompt(req: &RecommendationRequest) -> PromptPair {
    let user = format!(
        "Preciso de recomendações de investimento com base no meu perfil financeiro:\n\
- Renda mensal: R$ {income}\n\
- Despesas mensais: R$ {expenses}\n\
- Disponível para investir por mês: R$ {available}\n\
- Perfil de investidor: {profile}\n\
- Idade: {age} anos\n\n\
Sugira investimentos nacionais e internacionais adequados, com a alocação de cada um, \
um resumo da estratégia e os avisos importantes.",
        income = format_amount(req.monthly_income),
        expenses = format_amount(req.monthly_expenses),
        available = format_amount(req.available_to_invest()),
        profile = req.investment_profile,
        age = format_amount(req.age),
    );

    PromptPair {
        system: recommendation_system_prompt(),
        user,
    }
}

/// `2000` for whole amounts, `2000.50` otherwise.
fn format_amount(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{value:.0}")
    } else {
        format!("{value:.2}")
    }
}
